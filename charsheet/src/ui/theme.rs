//! Color theme and styling for the character sheets

use crossterm::style::{Attribute, Color, Stylize};
use crossterm::tty::IsTty;

/// Sheet color theme
#[derive(Debug, Clone)]
pub struct SheetTheme {
    /// False renders plain text with no escape codes.
    pub color: bool,

    pub foreground: Color,
    pub highlight: Color,
    pub subtle: Color,
    pub special: Color,
    pub paper: Color,

    pub notice: Color,
    pub error: Color,
}

impl Default for SheetTheme {
    fn default() -> Self {
        Self {
            color: true,
            foreground: Color::Rgb { r: 0xFA, g: 0xFA, b: 0xFA },
            highlight: Color::Rgb { r: 0x7D, g: 0x56, b: 0xF4 },
            subtle: Color::Rgb { r: 0x18, g: 0x18, b: 0x18 },
            special: Color::Rgb { r: 0x18, g: 0x18, b: 0x18 },
            paper: Color::White,
            notice: Color::Cyan,
            error: Color::Red,
        }
    }
}

impl SheetTheme {
    /// Colors only when stdout is a terminal.
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_tty(),
            ..Self::default()
        }
    }

    /// A theme that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// Card title block
    pub fn title(&self, text: &str) -> String {
        self.block(text, self.foreground, self.highlight)
    }

    /// Field label block
    pub fn label(&self, text: &str) -> String {
        self.block(text, self.foreground, self.subtle)
    }

    /// Stat label block
    pub fn stat(&self, text: &str) -> String {
        self.block(text, self.foreground, self.special)
    }

    /// Field value block
    pub fn value(&self, text: &str) -> String {
        self.block(text, self.special, self.paper)
    }

    /// Prompt question
    pub fn question(&self, text: &str) -> String {
        if self.color {
            text.to_string()
                .with(self.highlight)
                .attribute(Attribute::Bold)
                .to_string()
        } else {
            text.to_string()
        }
    }

    /// Secondary hint text, such as numbered options
    pub fn hint(&self, text: &str) -> String {
        if self.color {
            text.to_string().with(self.notice).to_string()
        } else {
            text.to_string()
        }
    }

    /// Error text
    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.to_string().with(self.error).to_string()
        } else {
            text.to_string()
        }
    }

    /// Text padded by one space on each side, on a colored background.
    fn block(&self, text: &str, fg: Color, bg: Color) -> String {
        let padded = format!(" {text} ");
        if self.color {
            padded.with(fg).on(bg).to_string()
        } else {
            padded
        }
    }
}
