//! Shared vocabulary for the spelling game.
//!
//! This module defines two groups of types:
//! - game vocabulary passed between controller, surface and audio:
//!   `Topic`, `Progress`, `Severity`, `BackgroundMode`
//! - style primitives that make up the surface's `StyleRegistry`

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Game vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Fruits,
    Career,
    Random,
}

impl Topic {
    /// Every topic, in menu order.
    pub const ALL: [Topic; 3] = [Topic::Fruits, Topic::Career, Topic::Random];

    pub fn key(self) -> &'static str {
        match self {
            Topic::Fruits => "fruits",
            Topic::Career => "career",
            Topic::Random => "random",
        }
    }

    /// Upper-cased name used in headings ("FRUITS").
    pub fn label(self) -> String {
        self.key().to_uppercase()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Position within a topic's queue. `current` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Classification of a status message, drives its visual treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Fail,
    #[default]
    Idle,
}

/// Which part of the game the background track is accompanying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    Menu,
    Game,
    Congrats,
}

// ---------------------------------------------------------------------------
// Style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
}

impl Style {
    pub fn fg(color: NamedColor) -> Self {
        Style {
            fg: Some(Color::Named(color)),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}
