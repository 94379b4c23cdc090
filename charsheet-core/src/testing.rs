//! Testing utilities.
//!
//! - `ScriptedPrompt` answers prompts from a queue, so creation flows can
//!   run without a terminal
//! - `sample_character` builds a fully populated record

use crate::character::Character;
use crate::prompt::{Prompt, PromptError};
use async_trait::async_trait;
use std::collections::VecDeque;

/// A queued answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    Text(String),
    Confirm(bool),
    /// Fail the next prompt with an IO error.
    Fail(String),
}

/// A prompt that replays scripted answers in order.
///
/// Once the script runs out every prompt returns [`PromptError::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<ScriptedAnswer>,
    titles: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the main creation form; see [`ScriptedPrompt::then_character`].
    pub fn for_character(name: &str, race: &str, class: &str) -> Self {
        Self::new().then_character(name, race, class)
    }

    /// Queue the main creation form: name, race, class, and "1" for every
    /// numeric field with empty background and alignment.
    pub fn then_character(self, name: &str, race: &str, class: &str) -> Self {
        let mut prompt = self
            .then_input(name)
            .then_input(race)
            .then_input(class)
            .then_input("1")
            .then_input("")
            .then_input("");
        for _ in 0..11 {
            prompt = prompt.then_input("1");
        }
        prompt
    }

    pub fn then_input(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(ScriptedAnswer::Text(text.into()));
        self
    }

    /// Queue list entries followed by the blank entry that ends the list.
    pub fn then_entries(mut self, entries: &[&str]) -> Self {
        for entry in entries {
            self = self.then_input(*entry);
        }
        self.then_input("")
    }

    pub fn then_confirm(mut self, answer: bool) -> Self {
        self.answers.push_back(ScriptedAnswer::Confirm(answer));
        self
    }

    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.answers.push_back(ScriptedAnswer::Fail(message.into()));
        self
    }

    /// Titles of every prompt asked so far.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Notices shown so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, title: &str) -> Result<ScriptedAnswer, PromptError> {
        self.titles.push(title.to_string());
        self.answers.pop_front().ok_or(PromptError::Closed)
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn input(&mut self, title: &str) -> Result<String, PromptError> {
        match self.next(title)? {
            ScriptedAnswer::Text(text) => Ok(text),
            ScriptedAnswer::Confirm(answer) => Ok(if answer { "y" } else { "n" }.to_string()),
            ScriptedAnswer::Fail(message) => Err(scripted_failure(message)),
        }
    }

    async fn select(&mut self, title: &str, _options: &[&str]) -> Result<String, PromptError> {
        self.input(title).await
    }

    async fn confirm(&mut self, title: &str) -> Result<bool, PromptError> {
        match self.next(title)? {
            ScriptedAnswer::Confirm(answer) => Ok(answer),
            ScriptedAnswer::Text(text) => Ok(matches!(text.trim(), "y" | "yes")),
            ScriptedAnswer::Fail(message) => Err(scripted_failure(message)),
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

fn scripted_failure(message: String) -> PromptError {
    PromptError::Io(std::io::Error::other(message))
}

/// A level 3 character with every field filled in.
pub fn sample_character(name: &str) -> Character {
    Character {
        name: name.to_string(),
        race: "Dwarf".to_string(),
        class: "Fighter".to_string(),
        level: 3,
        background: "Soldier".to_string(),
        strength: 16,
        dexterity: 12,
        constitution: 15,
        intelligence: 10,
        wisdom: 13,
        charisma: 8,
        alignment: "Lawful Good".to_string(),
        experience: 900,
        hit_points: 28,
        armor_class: 18,
        initiative: 1,
        speed: 25,
        proficiencies: vec!["Athletics".to_string(), "Intimidation".to_string()],
        languages: vec!["Common".to_string(), "Dwarvish".to_string()],
        equipment: vec![
            "Chain mail".to_string(),
            "Shield".to_string(),
            "Warhammer".to_string(),
        ],
    }
}
