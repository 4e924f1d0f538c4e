use crate::types::{Progress, Topic};

/// Logical mode of the game, derived from `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No topic in progress: home screen or topic picker.
    Menu,
    /// A word is waiting to be spelled.
    Playing,
    /// Every word of the topic was spelled.
    Complete,
}

/// The controller's record of the session.
///
/// `current_word` is `Some` exactly when a topic is selected and `word_index`
/// points into `words_queue`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    topic: Option<Topic>,
    current_word: Option<String>,
    word_index: usize,
    words_queue: Vec<String>,
}

impl GameState {
    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn words_queue(&self) -> &[String] {
        &self.words_queue
    }

    pub fn mode(&self) -> Mode {
        if self.current_word.is_some() {
            Mode::Playing
        } else if self.topic.is_some()
            && !self.words_queue.is_empty()
            && self.word_index >= self.words_queue.len()
        {
            Mode::Complete
        } else {
            Mode::Menu
        }
    }

    /// `None` unless a word is in play.
    pub fn progress(&self) -> Option<Progress> {
        self.current_word.as_ref().map(|_| Progress {
            current: self.word_index + 1,
            total: self.words_queue.len(),
        })
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start `topic` with `queue`. Returns the first word, or `None` when the
    /// queue is empty (nothing is in play then).
    pub(crate) fn begin(&mut self, topic: Topic, queue: Vec<String>) -> Option<&str> {
        self.topic = Some(topic);
        self.word_index = 0;
        self.words_queue = queue;
        self.current_word = self.words_queue.first().cloned();
        self.current_word.as_deref()
    }

    /// Move to the next word. Returns it, or `None` once the queue is done.
    pub(crate) fn advance(&mut self) -> Option<&str> {
        self.word_index += 1;
        self.current_word = self.words_queue.get(self.word_index).cloned();
        self.current_word.as_deref()
    }
}
