//! Word data: the ordered word list behind each topic.
//!
//! The built-in lists ship with the binary. A JSON file with the same shape
//! (`{"fruits": [...], "career": [...], "random": [...]}`) can replace them
//! wholesale at startup; the lists are never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Topic;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid word list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("topic {topic} has a blank word at position {}", .index + 1)]
    BlankWord { topic: Topic, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordTopics {
    #[serde(default)]
    pub fruits: Vec<String>,
    #[serde(default)]
    pub career: Vec<String>,
    #[serde(default)]
    pub random: Vec<String>,
}

impl WordTopics {
    pub fn words(&self, topic: Topic) -> &[String] {
        match topic {
            Topic::Fruits => &self.fruits,
            Topic::Career => &self.career,
            Topic::Random => &self.random,
        }
    }

    /// Topics paired with their word lists, in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (Topic, &[String])> {
        Topic::ALL.into_iter().map(|topic| (topic, self.words(topic)))
    }

    pub fn from_json(json: &str) -> Result<Self, WordListError> {
        let topics: WordTopics = serde_json::from_str(json)?;
        topics.validate()?;
        Ok(topics)
    }

    pub fn load(path: &Path) -> Result<Self, WordListError> {
        let json = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Rejects entries that are empty after trimming; such a word could
    /// never be spelled.
    pub fn validate(&self) -> Result<(), WordListError> {
        for (topic, words) in self.iter() {
            if let Some(index) = words.iter().position(|w| w.trim().is_empty()) {
                return Err(WordListError::BlankWord { topic, index });
            }
        }
        Ok(())
    }
}

impl Default for WordTopics {
    fn default() -> Self {
        fn list(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        WordTopics {
            fruits: list(&[
                "apple",
                "banana",
                "orange",
                "grape",
                "mango",
                "melon",
                "pineapple",
                "strawberry",
            ]),
            career: list(&[
                "doctor",
                "teacher",
                "farmer",
                "pilot",
                "nurse",
                "chef",
                "police",
                "engineer",
            ]),
            random: list(&[
                "umbrella",
                "ice cream",
                "bicycle",
                "rainbow",
                "pencil",
                "school bag",
                "computer",
                "elephant",
            ]),
        }
    }
}
