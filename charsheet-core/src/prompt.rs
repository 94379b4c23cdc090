//! The boundary between the roster and whatever asks the user questions.
//!
//! The terminal shell implements [`Prompt`] over stdin/stdout; tests use
//! [`crate::testing::ScriptedPrompt`].

use async_trait::async_trait;
use thiserror::Error;

/// Errors from prompting the user.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended (stdin closed, script exhausted).
    #[error("Input closed")]
    Closed,
}

/// Something that can ask the user for values.
#[async_trait]
pub trait Prompt: Send {
    /// Ask for a line of free text. The answer is returned untrimmed.
    async fn input(&mut self, title: &str) -> Result<String, PromptError>;

    /// Ask the user to pick one of `options`; returns the chosen option.
    async fn select(&mut self, title: &str, options: &[&str]) -> Result<String, PromptError>;

    /// Ask a yes/no question.
    async fn confirm(&mut self, title: &str) -> Result<bool, PromptError>;

    /// Show a one-line notice to the user.
    fn notify(&mut self, message: &str);
}
