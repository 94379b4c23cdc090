//! Building characters from raw user input.
//!
//! Numbers arrive as text. Anything that does not parse becomes 0 and is
//! reported as a [`Coercion`]; it never blocks creation.

use crate::character::{Character, CLASSES, RACES};
use crate::prompt::{Prompt, PromptError};
use log::warn;
use std::fmt;

/// Integer fields, in the order they are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Level,
    Experience,
    HitPoints,
    ArmorClass,
    Initiative,
    Speed,
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl NumericField {
    pub const COUNT: usize = 12;

    pub fn all() -> [NumericField; Self::COUNT] {
        [
            NumericField::Level,
            NumericField::Experience,
            NumericField::HitPoints,
            NumericField::ArmorClass,
            NumericField::Initiative,
            NumericField::Speed,
            NumericField::Strength,
            NumericField::Dexterity,
            NumericField::Constitution,
            NumericField::Intelligence,
            NumericField::Wisdom,
            NumericField::Charisma,
        ]
    }

    /// Title shown when asking for the field.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::Level => "Level",
            NumericField::Experience => "Experience Points",
            NumericField::HitPoints => "Hit Points",
            NumericField::ArmorClass => "Armor Class",
            NumericField::Initiative => "Initiative",
            NumericField::Speed => "Speed",
            NumericField::Strength => "Strength",
            NumericField::Dexterity => "Dexterity",
            NumericField::Constitution => "Constitution",
            NumericField::Intelligence => "Intelligence",
            NumericField::Wisdom => "Wisdom",
            NumericField::Charisma => "Charisma",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn assign(&self, character: &mut Character, value: i64) {
        let slot = match self {
            NumericField::Level => &mut character.level,
            NumericField::Experience => &mut character.experience,
            NumericField::HitPoints => &mut character.hit_points,
            NumericField::ArmorClass => &mut character.armor_class,
            NumericField::Initiative => &mut character.initiative,
            NumericField::Speed => &mut character.speed,
            NumericField::Strength => &mut character.strength,
            NumericField::Dexterity => &mut character.dexterity,
            NumericField::Constitution => &mut character.constitution,
            NumericField::Intelligence => &mut character.intelligence,
            NumericField::Wisdom => &mut character.wisdom,
            NumericField::Charisma => &mut character.charisma,
        };
        *slot = value;
    }
}

/// The three free-text list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Proficiencies,
    Languages,
    Equipment,
}

impl ListField {
    pub fn all() -> [ListField; 3] {
        [
            ListField::Proficiencies,
            ListField::Languages,
            ListField::Equipment,
        ]
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ListField::Proficiencies => "Adding Proficiencies:",
            ListField::Languages => "Adding Languages:",
            ListField::Equipment => "Adding Equipment:",
        }
    }

    pub fn entry_title(&self) -> &'static str {
        match self {
            ListField::Proficiencies => "Enter a proficiency (or leave blank to finish)",
            ListField::Languages => "Enter a language (or leave blank to finish)",
            ListField::Equipment => "Enter an equipment item (or leave blank to finish)",
        }
    }

    pub fn entries_mut<'a>(&self, character: &'a mut Character) -> &'a mut Vec<String> {
        match self {
            ListField::Proficiencies => &mut character.proficiencies,
            ListField::Languages => &mut character.languages,
            ListField::Equipment => &mut character.equipment,
        }
    }
}

/// A numeric input that did not parse and was replaced by 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coercion {
    pub field: NumericField,
    pub input: String,
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid input for {}: '{}'. Using default value 0.",
            self.field.label(),
            self.input
        )
    }
}

/// Parse a numeric field. Surrounding whitespace is ignored.
pub fn parse_number(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Everything the user typed for a new character, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: String,
    pub alignment: String,
    numbers: [String; NumericField::COUNT],
    pub proficiencies: Vec<String>,
    pub languages: Vec<String>,
    pub equipment: Vec<String>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_number(&mut self, field: NumericField, raw: impl Into<String>) {
        self.numbers[field.index()] = raw.into();
    }

    pub fn with_number(mut self, field: NumericField, raw: impl Into<String>) -> Self {
        self.set_number(field, raw);
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Parse the draft into a character.
    ///
    /// Never fails: each numeric field that does not parse is set to 0 and
    /// listed in the returned coercions, in parse order.
    pub fn build(self) -> (Character, Vec<Coercion>) {
        let CharacterDraft {
            name,
            race,
            class,
            background,
            alignment,
            numbers,
            proficiencies,
            languages,
            equipment,
        } = self;

        let mut character = Character {
            name,
            race,
            class,
            background,
            alignment,
            proficiencies,
            languages,
            equipment,
            ..Character::default()
        };

        let mut coercions = Vec::new();
        for field in NumericField::all() {
            let raw = &numbers[field.index()];
            let value = parse_number(raw).unwrap_or_else(|| {
                coercions.push(Coercion {
                    field,
                    input: raw.clone(),
                });
                0
            });
            field.assign(&mut character, value);
        }

        (character, coercions)
    }
}

/// Result of an interactive creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub character: Character,
    /// False when the user declined; `character` is then a discarded default.
    pub accepted: bool,
}

impl Creation {
    fn cancelled() -> Self {
        Self {
            character: Character::default(),
            accepted: false,
        }
    }
}

/// Walk the user through creating a character.
///
/// Only [`PromptError::Closed`] is returned as an error. Any other failure
/// while filling in the main form cancels the creation; failures reading a
/// list entry are reported and the entry is asked for again.
pub async fn create_character<P>(prompt: &mut P) -> Result<Creation, PromptError>
where
    P: Prompt + ?Sized,
{
    let draft = match fill_form(prompt).await {
        Ok(draft) => draft,
        Err(PromptError::Closed) => return Err(PromptError::Closed),
        Err(e) => {
            warn!("Character form failed: {e}");
            prompt.notify(&format!("Error during character creation: {e}"));
            return Ok(Creation::cancelled());
        }
    };

    let (mut character, coercions) = draft.build();
    for coercion in &coercions {
        warn!("Coerced {} input {:?} to 0", coercion.field.label(), coercion.input);
        prompt.notify(&coercion.to_string());
    }

    for field in ListField::all() {
        prompt.notify("");
        prompt.notify(field.heading());
        let entries = collect_entries(prompt, field.entry_title()).await?;
        field.entries_mut(&mut character).extend(entries);
    }

    let accepted = match prompt.confirm("Do you want to add this character?").await {
        Ok(answer) => answer,
        Err(PromptError::Closed) => return Err(PromptError::Closed),
        Err(e) => {
            warn!("Confirmation failed: {e}");
            false
        }
    };

    if accepted {
        Ok(Creation {
            character,
            accepted: true,
        })
    } else {
        Ok(Creation::cancelled())
    }
}

async fn fill_form<P>(prompt: &mut P) -> Result<CharacterDraft, PromptError>
where
    P: Prompt + ?Sized,
{
    let mut draft = CharacterDraft::new(prompt.input("Name").await?);
    draft.race = prompt.select("Race", &RACES).await?;
    draft.class = prompt.select("Class", &CLASSES).await?;

    let level = NumericField::Level;
    draft.set_number(level, prompt.input(level.label()).await?);
    draft.background = prompt.input("Background").await?;
    draft.alignment = prompt.input("Alignment").await?;

    for field in NumericField::all().into_iter().skip(1) {
        draft.set_number(field, prompt.input(field.label()).await?);
    }

    Ok(draft)
}

/// Read entries until a blank one.
async fn collect_entries<P>(prompt: &mut P, title: &str) -> Result<Vec<String>, PromptError>
where
    P: Prompt + ?Sized,
{
    let mut entries = Vec::new();
    loop {
        let input = match prompt.input(title).await {
            Ok(input) => input,
            Err(PromptError::Closed) => return Err(PromptError::Closed),
            Err(e) => {
                prompt.notify(&format!("Error reading input: {e}"));
                continue;
            }
        };

        let entry = input.trim();
        if entry.is_empty() {
            return Ok(entries);
        }

        prompt.notify(&format!("Added: {entry}"));
        entries.push(entry.to_string());
    }
}
