use std::collections::VecDeque;
use zeroize::Zeroizing;

pub const MAX_HISTORY: usize = 5;

/// Most-recent-first list of previously shown credentials.
///
/// Held in memory only; entries are wiped when evicted or dropped.
pub struct History {
    entries: VecDeque<Zeroizing<String>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `previous` when it is being replaced by a different `next`.
    ///
    /// Returns whether anything was recorded.
    pub fn record(&mut self, previous: &str, next: &str) -> bool {
        if previous.is_empty() || next.is_empty() || previous == next {
            return false;
        }

        self.entries.retain(|entry| entry.as_str() != previous);
        self.entries.push_front(Zeroizing::new(previous.to_string()));
        self.entries.truncate(self.capacity);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
