use rand::Rng;
use rand::seq::SliceRandom;

/// How a topic's word list becomes the session queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueOrder {
    /// Configured order, unchanged.
    #[default]
    Preserve,
    Shuffle,
}

impl QueueOrder {
    pub fn from_shuffle_flag(shuffle: bool) -> Self {
        if shuffle {
            QueueOrder::Shuffle
        } else {
            QueueOrder::Preserve
        }
    }
}

pub fn build_queue<R: Rng + ?Sized>(words: &[String], order: QueueOrder, rng: &mut R) -> Vec<String> {
    let mut queue = words.to_vec();
    if order == QueueOrder::Shuffle {
        queue.shuffle(rng);
    }
    queue
}
