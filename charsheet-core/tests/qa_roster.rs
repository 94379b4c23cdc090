//! QA tests for creating and deleting characters through the roster.
//!
//! Run with: `cargo test -p charsheet-core --test qa_roster -- --nocapture`

use charsheet_core::testing::ScriptedPrompt;
use charsheet_core::{create_character, Character, Deletion, Roster, Store};
use tempfile::TempDir;

fn party_roster(dir: &TempDir, names: &[&str]) -> Roster {
    let store = Store::new(dir.path().join("characters.json"));
    let characters = names.iter().map(|n| Character::named(*n)).collect();
    Roster::with_characters(store, characters)
}

fn names(roster: &Roster) -> Vec<String> {
    roster.characters().iter().map(|c| c.name.clone()).collect()
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_first_of_two() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut roster = party_roster(&dir, &["Aria", "Borin"]);

    let deleted = roster.delete(1).await;

    assert_eq!(deleted.outcome, Deletion::Removed(Character::named("Aria")));
    assert!(deleted.flush.is_ok());
    assert_eq!(names(&roster), vec!["Borin"]);

    let on_disk = roster.store().load().await.unwrap();
    assert_eq!(on_disk, vec![Character::named("Borin")]);
}

#[tokio::test]
async fn test_delete_out_of_bounds_leaves_roster() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut roster = party_roster(&dir, &["Aria", "Borin"]);

    let deleted = roster.delete(3).await;

    assert_eq!(
        deleted.outcome,
        Deletion::OutOfRange {
            position: 3,
            len: 2
        }
    );
    assert_eq!(names(&roster), vec!["Aria", "Borin"]);
}

#[tokio::test]
async fn test_delete_every_valid_position() {
    let party = ["Aria", "Borin", "Cora", "Dane"];

    for position in 1..=party.len() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut roster = party_roster(&dir, &party);

        let deleted = roster.delete(position as i64).await;
        assert!(deleted.outcome.is_removed());

        let expected: Vec<String> = party
            .iter()
            .enumerate()
            .filter(|(i, _)| i + 1 != position)
            .map(|(_, n)| n.to_string())
            .collect();
        assert_eq!(names(&roster), expected);
    }
}

#[tokio::test]
async fn test_positions_shift_after_delete() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut roster = party_roster(&dir, &["Aria", "Borin", "Cora"]);

    let _ = roster.delete(1).await;
    assert_eq!(roster.get(1).unwrap().name, "Borin");

    let deleted = roster.delete(1).await;
    assert_eq!(deleted.outcome, Deletion::Removed(Character::named("Borin")));
    assert_eq!(names(&roster), vec!["Cora"]);
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_created_character_is_persisted() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut roster = party_roster(&dir, &[]);

    let mut prompt = ScriptedPrompt::for_character("Aria", "Elf", "Wizard")
        .then_entries(&["Arcana"])
        .then_entries(&["Elvish", "Common"])
        .then_entries(&["Spellbook"])
        .then_confirm(true);

    let creation = create_character(&mut prompt).await.unwrap();
    assert!(creation.accepted);
    let added = roster.add(creation.character).await;
    assert!(added.flush.is_ok());

    let (reopened, notice) = Roster::open(roster.store().clone()).await;
    assert!(notice.is_none());
    assert_eq!(reopened.characters(), roster.characters());
    assert_eq!(reopened.characters()[0].languages, vec!["Elvish", "Common"]);
}

#[tokio::test]
async fn test_declined_creation_never_reaches_roster() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut roster = party_roster(&dir, &["Aria"]);

    let mut prompt = ScriptedPrompt::for_character("Borin", "Dwarf", "Cleric")
        .then_entries(&[])
        .then_entries(&[])
        .then_entries(&[])
        .then_confirm(false);

    let creation = create_character(&mut prompt).await.unwrap();
    if creation.accepted {
        let _ = roster.add(creation.character).await;
    }

    assert_eq!(roster.len(), 1);
}

#[tokio::test]
async fn test_non_numeric_input_becomes_zero() {
    let mut prompt = ScriptedPrompt::new()
        .then_input("Cora")
        .then_input("Halfling")
        .then_input("Rogue")
        .then_input("three")
        .then_input("Urchin")
        .then_input("Chaotic Neutral");
    for raw in ["900", "", "15", "+3", "25", "8", "18", "x", "10", "12", "14"] {
        prompt = prompt.then_input(raw);
    }
    let mut prompt = prompt
        .then_entries(&[])
        .then_entries(&[])
        .then_entries(&[])
        .then_confirm(true);

    let creation = create_character(&mut prompt).await.unwrap();
    let character = &creation.character;

    assert!(creation.accepted);
    assert_eq!(character.level, 0);
    assert_eq!(character.experience, 900);
    assert_eq!(character.hit_points, 0);
    assert_eq!(character.initiative, 3);
    assert_eq!(character.dexterity, 18);
    assert_eq!(character.constitution, 0);
    assert_eq!(character.charisma, 14);
    assert_eq!(character.background, "Urchin");

    let coercion_notices: Vec<_> = prompt
        .notices()
        .iter()
        .filter(|n| n.starts_with("Invalid input"))
        .collect();
    assert_eq!(coercion_notices.len(), 3);
}

#[tokio::test]
async fn test_form_failure_cancels_creation() {
    let mut prompt = ScriptedPrompt::new()
        .then_input("Dane")
        .then_fail("terminal went away");

    let creation = create_character(&mut prompt).await.unwrap();

    assert!(!creation.accepted);
    assert!(prompt
        .notices()
        .iter()
        .any(|n| n.starts_with("Error during character creation")));
}

#[tokio::test]
async fn test_list_entry_failure_is_retried() {
    let mut prompt = ScriptedPrompt::for_character("Eve", "Human", "Monk")
        .then_fail("hiccup")
        .then_entries(&["Insight"])
        .then_entries(&[])
        .then_entries(&[])
        .then_confirm(true);

    let creation = create_character(&mut prompt).await.unwrap();

    assert!(creation.accepted);
    assert_eq!(creation.character.proficiencies, vec!["Insight"]);
    assert!(prompt.notices().iter().any(|n| n.starts_with("Error reading input")));
}
