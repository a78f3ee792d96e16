#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::collections::VecDeque;

use super::HistoryEntry;

pub const HISTORY_LIMIT: usize = 50;

/// Newest-first, memory-only log of execution results. Entries past the limit
/// are dropped, not archived.
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> History {
        return History::new(HISTORY_LIMIT);
    }
}

impl History {
    pub fn new(limit: usize) -> History {
        return History {
            entries: VecDeque::with_capacity(limit),
            limit,
        };
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        return self.entries.iter();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
