use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::audio::AudioOptions;
use crate::surface::StyleRegistry;
use crate::types::BackgroundMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid key binding {0:?}")]
    InvalidBinding(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub audio: AudioOptions,
    pub volumes: BackgroundVolumes,
    /// Shuffle each topic's queue instead of keeping the configured order.
    pub shuffle: bool,
    pub key_bindings: KeyBindings,
    pub styles: StyleRegistry,
}

/// Background track volume for each part of the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundVolumes {
    pub menu: f32,
    pub game: f32,
    pub congrats: f32,
}

impl Default for BackgroundVolumes {
    fn default() -> Self {
        BackgroundVolumes {
            menu: 0.32,
            game: 0.08,
            congrats: 0.26,
        }
    }
}

impl BackgroundVolumes {
    pub fn volume(&self, mode: BackgroundMode) -> f32 {
        match mode {
            BackgroundMode::Menu => self.menu,
            BackgroundMode::Game => self.game,
            BackgroundMode::Congrats => self.congrats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub submit: Binding,
    pub home: Binding,
    pub replay: Binding,
    pub clear: Binding,
    pub mute: Binding,
    pub quit: Binding,
    pub move_up: Binding,
    pub move_down: Binding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;

        let plain = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        KeyBindings {
            submit: Binding::new(Enter, plain, "Enter"),
            home: Binding::new(Esc, plain, "Esc"),
            replay: Binding::new(Tab, plain, "Tab"),
            clear: Binding::new(Char('u'), ctrl, "Ctrl-u"),
            mute: Binding::new(F(2), plain, "F2"),
            quit: Binding::new(Char('c'), ctrl, "Ctrl-c"),
            move_up: Binding::new(Up, plain, "Up"),
            move_down: Binding::new(Down, plain, "Down"),
        }
    }
}

impl GameConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist and parse. Without one, the per-user file
    /// is tried; a missing file means defaults, an invalid one is logged and
    /// replaced by defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        match Self::read(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "invalid config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spelling-master").join("config.json"))
    }
}

// ---------------------------------------------------------------------------
// Key bindings
// ---------------------------------------------------------------------------

/// A key plus required modifiers, written in config as `"Enter"`, `"F2"`,
/// `"Ctrl-u"`, `"Alt-r"` or a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Binding {
    code: KeyCode,
    modifiers: KeyModifiers,
    text: String,
}

impl Binding {
    fn new(code: KeyCode, modifiers: KeyModifiers, text: &str) -> Self {
        Binding {
            code,
            modifiers,
            text: text.to_string(),
        }
    }

    /// Check whether a crossterm `KeyEvent` triggers this binding.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.modifiers.is_empty() {
            // Plain bindings like "x" must not fire on Ctrl-x or Alt-x.
            if event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return false;
            }
        } else if !event.modifiers.contains(self.modifiers) {
            return false;
        }
        event.code == self.code
    }

    /// The binding as written in config, used for key hints.
    pub fn label(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Binding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidBinding(s.to_string());

        let (modifiers, key) = if let Some(rest) = s.strip_prefix("Ctrl-") {
            (KeyModifiers::CONTROL, rest)
        } else if let Some(rest) = s.strip_prefix("Alt-") {
            (KeyModifiers::ALT, rest)
        } else {
            (KeyModifiers::NONE, s)
        };

        let code = match key {
            "Enter" => KeyCode::Enter,
            "Esc" => KeyCode::Esc,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Space" => KeyCode::Char(' '),
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            k => {
                // "F1" through "F12"; a lone "F" is the character.
                if let Some(n) = k.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                    KeyCode::F(n)
                } else {
                    let mut chars = k.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => KeyCode::Char(c),
                        _ => return Err(invalid()),
                    }
                }
            }
        };

        Ok(Binding {
            code,
            modifiers,
            text: s.to_string(),
        })
    }
}

impl TryFrom<String> for Binding {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Binding> for String {
    fn from(binding: Binding) -> Self {
        binding.text
    }
}
