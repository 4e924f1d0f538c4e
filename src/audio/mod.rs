//! Audio player: word pronunciations, feedback stings and background music.
//!
//! Playback is best-effort: failures are logged here and never reach the
//! caller. At most one foreground clip (word or sting) and one background
//! track are alive at a time; a new foreground request stops the previous
//! clip before opening the next one.

mod backend;
#[cfg(feature = "sound")]
mod rodio_backend;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::words::WordTopics;

pub use backend::{AudioError, Backend, Clip, SilentBackend};
#[cfg(feature = "sound")]
pub use rodio_backend::RodioBackend;

/// Commands the game controller issues to audio.
pub trait Audio {
    fn play_word(&mut self, word: &str);
    fn play_success(&mut self);
    fn play_fail(&mut self);
    fn start_background(&mut self);
    fn set_background_volume(&mut self, level: f32);
    fn stop_background(&mut self);
    fn stop(&mut self);
    /// Flip the mute flag and return the new state.
    fn toggle_mute(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    pub base_path: PathBuf,
    /// Extension of the per-word clips, without the dot.
    pub word_extension: String,
    pub success_file: String,
    pub fail_file: String,
    pub default_volume: f32,
    pub background_file: Option<String>,
    pub background_volume: f32,
}

impl Default for AudioOptions {
    fn default() -> Self {
        AudioOptions {
            base_path: PathBuf::from("assets/sounds"),
            word_extension: "mp3".into(),
            success_file: "correct.wav".into(),
            fail_file: "fail.mp3".into(),
            default_volume: 0.9,
            background_file: Some("Backsound.mp3".into()),
            background_volume: 0.32,
        }
    }
}

impl AudioOptions {
    pub fn word_path(&self, word: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", sanitize(word), self.word_extension))
    }

    pub fn success_path(&self) -> PathBuf {
        self.base_path.join(&self.success_file)
    }

    pub fn fail_path(&self) -> PathBuf {
        self.base_path.join(&self.fail_file)
    }

    pub fn background_path(&self) -> Option<PathBuf> {
        self.background_file.as_ref().map(|f| self.base_path.join(f))
    }

    /// Every asset the game may request for `topics`: stings, background,
    /// then each word's clip. Duplicates are listed once.
    pub fn required_assets(&self, topics: &WordTopics) -> Vec<PathBuf> {
        let mut paths = vec![self.success_path(), self.fail_path()];
        paths.extend(self.background_path());
        for (_, words) in topics.iter() {
            for word in words {
                let path = self.word_path(word);
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        paths
    }
}

/// Asset key for a word: trimmed, lowercased, whitespace runs collapsed to a
/// single hyphen. `"Ice Cream"` becomes `"ice-cream"`.
pub fn sanitize(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

pub struct AudioPlayer {
    backend: Box<dyn Backend>,
    options: AudioOptions,
    foreground: Option<Box<dyn Clip>>,
    background: Option<Box<dyn Clip>>,
    background_volume: f32,
    muted: bool,
}

impl AudioPlayer {
    pub fn new(options: AudioOptions, backend: Box<dyn Backend>) -> Self {
        let background_volume = clamp_volume(options.background_volume);
        Self {
            backend,
            options,
            foreground: None,
            background: None,
            background_volume,
            muted: false,
        }
    }

    pub fn options(&self) -> &AudioOptions {
        &self.options
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn background_volume(&self) -> f32 {
        self.background_volume
    }

    pub fn has_foreground(&self) -> bool {
        self.foreground.is_some()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    fn effective(&self, level: f32) -> f32 {
        if self.muted { 0.0 } else { clamp_volume(level) }
    }

    fn play(&mut self, path: &Path) {
        self.stop();
        let volume = self.effective(self.options.default_volume);
        match self.backend.open(path, false, volume) {
            Ok(clip) => {
                debug!(path = %path.display(), "playing clip");
                self.foreground = Some(clip);
            }
            Err(e) => warn!(error = %e, "audio playback failed"),
        }
    }
}

impl Audio for AudioPlayer {
    fn play_word(&mut self, word: &str) {
        let path = self.options.word_path(word);
        self.play(&path);
    }

    fn play_success(&mut self) {
        let path = self.options.success_path();
        self.play(&path);
    }

    fn play_fail(&mut self) {
        let path = self.options.fail_path();
        self.play(&path);
    }

    fn start_background(&mut self) {
        let Some(path) = self.options.background_path() else {
            return;
        };
        if let Some(clip) = self.background.as_mut() {
            clip.resume();
            return;
        }
        let volume = self.effective(self.background_volume);
        match self.backend.open(&path, true, volume) {
            Ok(clip) => {
                debug!(path = %path.display(), "background started");
                self.background = Some(clip);
            }
            Err(e) => warn!(error = %e, "background audio playback failed"),
        }
    }

    fn set_background_volume(&mut self, level: f32) {
        self.background_volume = clamp_volume(level);
        let volume = self.effective(self.background_volume);
        if let Some(clip) = self.background.as_mut() {
            clip.set_volume(volume);
        }
    }

    fn stop_background(&mut self) {
        if let Some(mut clip) = self.background.take() {
            clip.stop();
        }
    }

    fn stop(&mut self) {
        if let Some(mut clip) = self.foreground.take() {
            clip.stop();
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let foreground = self.effective(self.options.default_volume);
        let background = self.effective(self.background_volume);
        if let Some(clip) = self.foreground.as_mut() {
            clip.set_volume(foreground);
        }
        if let Some(clip) = self.background.as_mut() {
            clip.set_volume(background);
        }
        debug!(muted = self.muted, "mute toggled");
        self.muted
    }
}

/// Best available backend: `rodio` when built with the `sound` feature and an
/// output device opens, otherwise silent.
pub fn default_backend() -> Box<dyn Backend> {
    #[cfg(feature = "sound")]
    {
        match RodioBackend::new() {
            Ok(backend) => return Box::new(backend),
            Err(e) => warn!(error = %e, "falling back to silent audio"),
        }
    }
    Box::new(SilentBackend)
}
