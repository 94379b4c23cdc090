//! Line-oriented prompts over stdin/stdout.
//!
//! Every question is one line of output followed by one line of input.
//! Selections are made by number or by typing the option itself.

use async_trait::async_trait;
use charsheet_core::{Prompt, PromptError};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::ui::SheetTheme;

/// Prompts the user on the controlling terminal.
pub struct TerminalPrompt {
    lines: Lines<BufReader<Stdin>>,
    theme: SheetTheme,
}

impl TerminalPrompt {
    pub fn new(theme: SheetTheme) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            theme,
        }
    }

    fn ask(&self, question: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", self.theme.question(question))?;
        stdout.flush()
    }

    async fn read_line(&mut self) -> Result<String, PromptError> {
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(PromptError::Closed),
        }
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn input(&mut self, title: &str) -> Result<String, PromptError> {
        self.ask(&format!("{title}:"))?;
        self.read_line().await
    }

    async fn select(&mut self, title: &str, options: &[&str]) -> Result<String, PromptError> {
        println!("{}", self.theme.question(title));
        for (i, option) in options.iter().enumerate() {
            println!("{}", self.theme.hint(&format!("  {}) {option}", i + 1)));
        }

        loop {
            self.ask(&format!("Choose 1-{}:", options.len()))?;
            let line = self.read_line().await?;
            if let Some(choice) = resolve_choice(&line, options) {
                return Ok(choice.to_string());
            }
            println!("{}", self.theme.error("Please pick one of the listed options."));
        }
    }

    async fn confirm(&mut self, title: &str) -> Result<bool, PromptError> {
        loop {
            self.ask(&format!("{title} [y/n]"))?;
            let line = self.read_line().await?;
            if let Some(answer) = parse_yes_no(&line) {
                return Ok(answer);
            }
            println!("{}", self.theme.error("Please answer y or n."));
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Match input against options by 1-based number or case-insensitive text.
pub fn resolve_choice<'a>(raw: &str, options: &[&'a str]) -> Option<&'a str> {
    let raw = raw.trim();
    if let Ok(number) = raw.parse::<usize>() {
        return number.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
        .copied()
}

pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
