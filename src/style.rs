use std::io::IsTerminal;

use colored::Colorize;
use lazy_static::lazy_static;

lazy_static! {
    static ref COLOR_DETECTED: bool =
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
}

/// Colors for terminal messages. Disabled styles return text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    enabled: bool,
}

impl Style {
    /// Colored when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        if *COLOR_DETECTED { Self { enabled: true } } else { Self::plain() }
    }

    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn ok(&self, text: &str) -> String {
        if self.enabled { text.green().to_string() } else { text.to_string() }
    }

    pub fn warn(&self, text: &str) -> String {
        if self.enabled { text.yellow().to_string() } else { text.to_string() }
    }

    pub fn fail(&self, text: &str) -> String {
        if self.enabled { text.red().to_string() } else { text.to_string() }
    }
}
