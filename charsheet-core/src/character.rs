//! The character record and its field set.
//!
//! A [`Character`] has no identity beyond its position in the roster, so
//! two records with the same name are perfectly legal.

use serde::{Deserialize, Deserializer, Serialize};

/// Races offered when creating a character.
pub const RACES: [&str; 5] = ["Human", "Elf", "Dwarf", "Halfling", "Orc"];

/// Classes offered when creating a character.
pub const CLASSES: [&str; 5] = ["Fighter", "Wizard", "Rogue", "Cleric", "Monk"];

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

/// A tabletop character record.
///
/// Every field always has a value: numbers default to 0, text to the
/// empty string and lists to empty. Scores carry no range checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    // Basic info
    pub name: String,
    pub race: String,
    pub class: String,
    pub level: i64,
    pub background: String,

    // Ability scores
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,

    // Additional info
    pub alignment: String,
    pub experience: i64,
    pub hit_points: i64,
    pub armor_class: i64,
    pub initiative: i64,
    pub speed: i64,

    /// Free-text entries in the order they were added.
    #[serde(deserialize_with = "nullable_list")]
    pub proficiencies: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub equipment: Vec<String>,
}

impl Character {
    /// Create an otherwise empty character with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get an ability score.
    pub fn ability(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set an ability score.
    pub fn set_ability(&mut self, ability: Ability, value: i64) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }
}

/// Older snapshots store an empty list as `null`.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
