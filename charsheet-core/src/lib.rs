//! Tabletop character roster with JSON persistence.
//!
//! This crate provides:
//! - The character record and its JSON layout
//! - Whole-file persistence of the roster
//! - Positional create/list/delete over an in-memory roster
//! - A final flush when the process is interrupted
//!
//! # Quick Start
//!
//! ```ignore
//! use charsheet_core::{create_character, Roster, RosterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RosterConfig::from_env();
//!     let (mut roster, notice) = Roster::open(config.store()).await;
//!     if let Some(e) = notice {
//!         println!("Error loading characters: {e}");
//!     }
//!
//!     let mut prompt = my_terminal_prompt();
//!     let creation = create_character(&mut prompt).await?;
//!     if creation.accepted {
//!         let _ = roster.add(creation.character).await;
//!     }
//! }
//! ```

pub mod character;
pub mod character_builder;
pub mod config;
pub mod persist;
pub mod prompt;
pub mod roster;
pub mod shutdown;
pub mod testing;

// Primary public API
pub use character::{Ability, Character, CLASSES, RACES};
pub use character_builder::{create_character, CharacterDraft, Coercion, Creation, NumericField};
pub use config::RosterConfig;
pub use persist::{PersistError, Store};
pub use prompt::{Prompt, PromptError};
pub use roster::{delete_character, list_characters, Deletion, Flushed, Roster, SharedRoster};
pub use shutdown::{flush_on_shutdown, wait_for_signal, Shutdown, ShutdownSignal, ShutdownState};
