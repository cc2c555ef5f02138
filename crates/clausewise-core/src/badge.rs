//! Presentation mapping for status and risk badges.

use crate::contract::{Risk, Status};

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl Tone {
    /// ANSI SGR foreground sequence for terminal rendering.
    pub fn ansi(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Yellow => "\x1b[33m",
            Tone::Orange => "\x1b[38;5;208m",
            Tone::Red => "\x1b[31m",
            Tone::Gray => "\x1b[90m",
        }
    }
}

pub const ANSI_RESET: &str = "\x1b[0m";

impl Status {
    pub fn tone(self) -> Tone {
        match self {
            Status::Active => Tone::Green,
            Status::RenewalDue => Tone::Orange,
            Status::Expired => Tone::Gray,
        }
    }

    pub fn icon(self) -> char {
        match self {
            Status::Active => '✔',
            Status::RenewalDue => '◷',
            Status::Expired => '⚠',
        }
    }
}

impl Risk {
    pub fn tone(self) -> Tone {
        match self {
            Risk::Low => Tone::Green,
            Risk::Medium => Tone::Yellow,
            Risk::High => Tone::Red,
        }
    }
}

/// Wrap `text` in the tone's colour, or leave it plain.
pub fn paint(text: &str, tone: Tone, colour: bool) -> String {
    if colour {
        format!("{}{}{}", tone.ansi(), text, ANSI_RESET)
    } else {
        text.to_string()
    }
}
