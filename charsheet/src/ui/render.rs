//! Rendering characters as text cards

use charsheet_core::{Ability, Character};

use super::theme::SheetTheme;

/// Render the whole roster, one card per character, numbered from 1.
pub fn render_roster(theme: &SheetTheme, characters: &[Character]) -> String {
    if characters.is_empty() {
        return "No characters found.".to_string();
    }

    characters
        .iter()
        .enumerate()
        .map(|(i, character)| render_character(theme, i + 1, character))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single character card. Ends with a blank line.
pub fn render_character(theme: &SheetTheme, position: usize, character: &Character) -> String {
    let mut lines = Vec::with_capacity(9);

    lines.push(theme.title(&format!("Character {position}: {}", character.name)));

    lines.push(
        [
            theme.label("Race"),
            theme.value(&character.race),
            theme.label("Class"),
            theme.value(&character.class),
            theme.label("Level"),
            theme.value(&character.level.to_string()),
        ]
        .concat(),
    );

    lines.push(
        [
            theme.label("Background"),
            theme.value(&character.background),
            theme.label("Alignment"),
            theme.value(&character.alignment),
        ]
        .concat(),
    );

    for row in Ability::all().chunks(3) {
        let cells: Vec<String> = row
            .iter()
            .flat_map(|ability| {
                [
                    theme.stat(ability.abbreviation()),
                    theme.value(&format!("{:2}", character.ability(*ability))),
                ]
            })
            .collect();
        lines.push(cells.concat());
    }

    lines.push(
        [
            theme.stat("HP"),
            theme.value(&format!("{:3}", character.hit_points)),
            theme.stat("Armor Class"),
            theme.value(&format!("{:2}", character.armor_class)),
            theme.stat("Initiative"),
            theme.value(&format!("{:2}", character.initiative)),
            theme.stat("Speed"),
            theme.value(&format!("{:2}", character.speed)),
        ]
        .concat(),
    );

    for (label, entries) in [
        ("Proficiencies:", &character.proficiencies),
        ("Languages:", &character.languages),
        ("Equipment:", &character.equipment),
    ] {
        lines.push(format!(
            "{} {}",
            theme.label(label),
            theme.value(&entries.join(", "))
        ));
    }

    let mut card = lines.join("\n");
    card.push_str("\n\n");
    card
}
