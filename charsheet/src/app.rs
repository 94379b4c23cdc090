//! Main menu loop

use std::sync::Arc;

use charsheet_core::{
    create_character, flush_on_shutdown, Deletion, PersistError, Prompt, PromptError,
    SharedRoster, Shutdown, ShutdownSignal,
};
use log::{debug, warn};

use crate::ui::{render_roster, SheetTheme};

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Create,
    View,
    Delete,
    Exit,
}

impl MenuAction {
    pub fn all() -> [MenuAction; 4] {
        [
            MenuAction::Create,
            MenuAction::View,
            MenuAction::Delete,
            MenuAction::Exit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Create => "Create a new character",
            MenuAction::View => "View all characters",
            MenuAction::Delete => "Delete a character",
            MenuAction::Exit => "Exit",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::Create => "create",
            MenuAction::View => "view",
            MenuAction::Delete => "delete",
            MenuAction::Exit => "exit",
        }
    }

    /// Accepts either the menu label or the short key.
    pub fn parse(s: &str) -> Option<MenuAction> {
        let s = s.trim();
        Self::all()
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(s) || a.key().eq_ignore_ascii_case(s))
    }
}

/// Whether the loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Main application state
pub struct App {
    roster: SharedRoster,
    shutdown: Arc<Shutdown>,
    theme: SheetTheme,
}

impl App {
    pub fn new(roster: SharedRoster, shutdown: Arc<Shutdown>, theme: SheetTheme) -> Self {
        Self {
            roster,
            shutdown,
            theme,
        }
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// Either way the roster gets one final flush.
    pub async fn run<P: Prompt>(&self, prompt: &mut P) {
        let labels: Vec<&str> = MenuAction::all().iter().map(|a| a.label()).collect();

        loop {
            let action = match prompt.select("What would you like to do?", &labels).await {
                Ok(choice) => MenuAction::parse(&choice),
                Err(PromptError::Closed) => Some(MenuAction::Exit),
                Err(e) => {
                    warn!("Menu prompt failed: {e}");
                    prompt.notify(&self.theme.error(&format!("Error reading input: {e}")));
                    Some(MenuAction::Exit)
                }
            };

            let Some(action) = action else {
                continue;
            };
            debug!("Menu action: {}", action.key());

            let flow = match action {
                MenuAction::Create => self.create(prompt).await,
                MenuAction::View => self.view(prompt).await,
                MenuAction::Delete => self.delete(prompt).await,
                MenuAction::Exit => Flow::Stop,
            };

            if flow == Flow::Stop {
                self.exit(prompt).await;
                return;
            }
        }
    }

    async fn create<P: Prompt>(&self, prompt: &mut P) -> Flow {
        let creation = match create_character(prompt).await {
            Ok(creation) => creation,
            Err(_) => return Flow::Stop,
        };

        if !creation.accepted {
            prompt.notify("Character creation cancelled.");
            return Flow::Continue;
        }

        let added = self.roster.lock().await.add(creation.character).await;
        match added.flush {
            Ok(()) => prompt.notify("Character added successfully!"),
            Err(e) => self.report_save_error(prompt, &e),
        }
        Flow::Continue
    }

    async fn view<P: Prompt>(&self, prompt: &mut P) -> Flow {
        let rendered = {
            let roster = self.roster.lock().await;
            render_roster(&self.theme, roster.characters())
        };
        prompt.notify(&rendered);
        Flow::Continue
    }

    async fn delete<P: Prompt>(&self, prompt: &mut P) -> Flow {
        let rendered = {
            let roster = self.roster.lock().await;
            if roster.is_empty() {
                None
            } else {
                Some(render_roster(&self.theme, roster.characters()))
            }
        };

        let Some(rendered) = rendered else {
            prompt.notify("No characters to delete.");
            return Flow::Continue;
        };
        prompt.notify(&rendered);

        let raw = match prompt
            .input("Enter the number of the character to delete (or 0 to cancel)")
            .await
        {
            Ok(raw) => raw,
            Err(PromptError::Closed) => return Flow::Stop,
            Err(e) => {
                warn!("Delete prompt failed: {e}");
                prompt.notify("Invalid input. No character deleted.");
                return Flow::Continue;
            }
        };

        let Ok(position) = raw.trim().parse::<i64>() else {
            prompt.notify("Invalid input. No character deleted.");
            return Flow::Continue;
        };

        let deleted = self.roster.lock().await.delete(position).await;
        match deleted.outcome {
            Deletion::Cancelled => prompt.notify("Deletion cancelled."),
            Deletion::OutOfRange { .. } => prompt.notify("Invalid input. No character deleted."),
            Deletion::Removed(character) => {
                prompt.notify(&format!("Character '{}' has been deleted.", character.name))
            }
        }
        if let Err(e) = deleted.flush {
            self.report_save_error(prompt, &e);
        }
        Flow::Continue
    }

    async fn exit<P: Prompt>(&self, prompt: &mut P) {
        prompt.notify("Saving characters and exiting. Goodbye!");
        let flushed = flush_on_shutdown(&self.roster, &self.shutdown, ShutdownSignal::Exit).await;
        if let Some(Err(e)) = flushed {
            self.report_save_error(prompt, &e);
        }
    }

    fn report_save_error<P: Prompt>(&self, prompt: &mut P, e: &PersistError) {
        prompt.notify(&self.theme.error(&format!("Error saving characters: {e}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_core::testing::{sample_character, ScriptedPrompt};
    use charsheet_core::{Character, Roster, ShutdownState, Store};
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    fn app_with(dir: &TempDir, characters: Vec<Character>) -> (App, SharedRoster, Arc<Shutdown>) {
        let store = Store::new(dir.path().join("characters.json"));
        let roster = Arc::new(Mutex::new(Roster::with_characters(store, characters)));
        let shutdown = Arc::new(Shutdown::new());
        let app = App::new(roster.clone(), shutdown.clone(), SheetTheme::plain());
        (app, roster, shutdown)
    }

    #[test]
    fn test_parse_menu_action() {
        assert_eq!(MenuAction::parse("create"), Some(MenuAction::Create));
        assert_eq!(MenuAction::parse("View all characters"), Some(MenuAction::View));
        assert_eq!(MenuAction::parse(" EXIT "), Some(MenuAction::Exit));
        assert_eq!(MenuAction::parse("dance"), None);
    }

    #[tokio::test]
    async fn test_exit_flushes_once() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, _roster, shutdown) = app_with(&dir, vec![sample_character("Aria")]);
        let mut prompt = ScriptedPrompt::new().then_input("exit");

        app.run(&mut prompt).await;

        assert_eq!(shutdown.state(), ShutdownState::Exited);
        let on_disk = Store::new(dir.path().join("characters.json")).load().await.unwrap();
        assert_eq!(on_disk, vec![sample_character("Aria")]);
        assert!(prompt
            .notices()
            .iter()
            .any(|n| n == "Saving characters and exiting. Goodbye!"));
    }

    #[tokio::test]
    async fn test_closed_input_exits() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, _roster, shutdown) = app_with(&dir, vec![]);
        let mut prompt = ScriptedPrompt::new();

        app.run(&mut prompt).await;

        assert_eq!(shutdown.state(), ShutdownState::Exited);
    }

    #[tokio::test]
    async fn test_view_empty_roster() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, _roster, _) = app_with(&dir, vec![]);
        let mut prompt = ScriptedPrompt::new().then_input("view").then_input("exit");

        app.run(&mut prompt).await;

        assert!(prompt.notices().iter().any(|n| n == "No characters found."));
    }

    #[tokio::test]
    async fn test_delete_empty_roster_skips_prompt() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, _roster, _) = app_with(&dir, vec![]);
        let mut prompt = ScriptedPrompt::new().then_input("delete").then_input("exit");

        app.run(&mut prompt).await;

        assert!(prompt.notices().iter().any(|n| n == "No characters to delete."));
        assert_eq!(prompt.titles().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_position() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, roster, _) = app_with(
            &dir,
            vec![Character::named("Aria"), Character::named("Borin")],
        );
        let mut prompt = ScriptedPrompt::new()
            .then_input("delete")
            .then_input("1")
            .then_input("exit");

        app.run(&mut prompt).await;

        assert_eq!(
            roster.lock().await.characters(),
            [Character::named("Borin")].as_slice()
        );
        assert!(prompt
            .notices()
            .iter()
            .any(|n| n == "Character 'Aria' has been deleted."));
    }

    #[tokio::test]
    async fn test_delete_rejects_bad_input() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, roster, _) = app_with(
            &dir,
            vec![Character::named("Aria"), Character::named("Borin")],
        );
        let mut prompt = ScriptedPrompt::new()
            .then_input("delete")
            .then_input("3")
            .then_input("delete")
            .then_input("first")
            .then_input("delete")
            .then_input("0")
            .then_input("exit");

        app.run(&mut prompt).await;

        assert_eq!(roster.lock().await.len(), 2);
        let invalid = prompt
            .notices()
            .iter()
            .filter(|n| *n == "Invalid input. No character deleted.")
            .count();
        assert_eq!(invalid, 2);
        assert!(prompt.notices().iter().any(|n| n == "Deletion cancelled."));
    }

    #[tokio::test]
    async fn test_create_then_view() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (app, roster, _) = app_with(&dir, vec![]);
        let mut prompt = ScriptedPrompt::new()
            .then_input("create")
            .then_character("Cora", "Halfling", "Rogue")
            .then_entries(&["Stealth"])
            .then_entries(&[])
            .then_entries(&["Dagger"])
            .then_confirm(true)
            .then_input("view")
            .then_input("exit");

        app.run(&mut prompt).await;

        assert_eq!(roster.lock().await.len(), 1);
        assert!(prompt
            .notices()
            .iter()
            .any(|n| n == "Character added successfully!"));
        assert!(prompt
            .notices()
            .iter()
            .any(|n| n.contains("Character 1: Cora")));
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::new(dir.path().join("missing").join("characters.json"));
        let roster = Arc::new(Mutex::new(Roster::with_characters(
            store,
            vec![Character::named("Aria")],
        )));
        let app = App::new(roster.clone(), Arc::new(Shutdown::new()), SheetTheme::plain());
        let mut prompt = ScriptedPrompt::new()
            .then_input("delete")
            .then_input("1")
            .then_input("exit");

        app.run(&mut prompt).await;

        assert!(roster.lock().await.is_empty());
        let errors = prompt
            .notices()
            .iter()
            .filter(|n| n.starts_with("Error saving characters"))
            .count();
        assert_eq!(errors, 2);
    }
}
