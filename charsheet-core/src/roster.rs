//! The in-memory roster and its mutations.
//!
//! Characters are addressed by their 1-based position in the list as shown
//! to the user. Positions are translated to offsets here and nowhere else;
//! they are never persisted.

use crate::character::Character;
use crate::persist::{PersistError, Store};
use log::warn;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A roster shared between the menu loop and the shutdown listener.
///
/// Hold the lock for a whole mutation plus its flush so the listener never
/// saves a half-applied change.
pub type SharedRoster = Arc<Mutex<Roster>>;

/// Outcome of a positional delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// Position 0: the user backed out.
    Cancelled,
    /// Position outside `1..=len`; nothing was removed.
    OutOfRange { position: i64, len: usize },
    /// The character that was removed.
    Removed(Character),
}

impl Deletion {
    pub fn is_removed(&self) -> bool {
        matches!(self, Deletion::Removed(_))
    }
}

/// Remove the character at a 1-based `position`.
///
/// 0 cancels. Anything below 0 or above the roster length is rejected with
/// the roster untouched. The remaining characters keep their order.
pub fn delete_character(characters: &mut Vec<Character>, position: i64) -> Deletion {
    let len = characters.len();
    if position == 0 {
        return Deletion::Cancelled;
    }

    match usize::try_from(position) {
        Ok(position) if position <= len => Deletion::Removed(characters.remove(position - 1)),
        _ => Deletion::OutOfRange { position, len },
    }
}

/// The roster, for display. Callers must handle the empty case themselves.
pub fn list_characters(characters: &[Character]) -> &[Character] {
    characters
}

/// A mutation together with the result of flushing it to disk.
///
/// A failed flush does not undo the mutation; memory and disk stay apart
/// until the next successful save.
#[derive(Debug)]
#[must_use]
pub struct Flushed<T> {
    pub outcome: T,
    pub flush: Result<(), PersistError>,
}

/// The session's characters and the file they are saved to.
#[derive(Debug)]
pub struct Roster {
    characters: Vec<Character>,
    store: Store,
}

impl Roster {
    /// An empty roster that has not touched disk.
    pub fn new(store: Store) -> Self {
        Self {
            characters: Vec::new(),
            store,
        }
    }

    /// Start from an explicit list of characters.
    pub fn with_characters(store: Store, characters: Vec<Character>) -> Self {
        Self { characters, store }
    }

    /// Load the roster from its snapshot.
    ///
    /// Never fails. If the snapshot cannot be read or parsed the roster
    /// starts empty and the error is handed back for the user to see; the
    /// file itself is left alone until the next save.
    pub async fn open(store: Store) -> (Self, Option<PersistError>) {
        match store.load().await {
            Ok(characters) => (Self::with_characters(store, characters), None),
            Err(e) => {
                warn!("Starting with an empty roster: {e}");
                (Self::new(store), Some(e))
            }
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn characters(&self) -> &[Character] {
        list_characters(&self.characters)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Character at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&Character> {
        position.checked_sub(1).and_then(|i| self.characters.get(i))
    }

    /// Append a character and flush.
    pub async fn add(&mut self, character: Character) -> Flushed<()> {
        self.characters.push(character);
        Flushed {
            outcome: (),
            flush: self.flush().await,
        }
    }

    /// Delete by 1-based position, flushing only if something was removed.
    pub async fn delete(&mut self, position: i64) -> Flushed<Deletion> {
        let outcome = delete_character(&mut self.characters, position);
        let flush = if outcome.is_removed() {
            self.flush().await
        } else {
            Ok(())
        };
        Flushed { outcome, flush }
    }

    /// Save the full roster.
    pub async fn flush(&self) -> Result<(), PersistError> {
        let result = self.store.save(&self.characters).await;
        if let Err(e) = &result {
            warn!("Flush failed, roster only in memory: {e}");
        }
        result
    }
}
