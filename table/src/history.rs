use std::collections::VecDeque;

use minepot_core::HistoryRecord;

/// How many settled wagers a seat remembers.
pub const HISTORY_LIMIT: usize = 50;

/// Sink for settled sessions. The table appends exactly once per terminal
/// transition.
pub trait HistoryStore {
    fn append(&mut self, record: HistoryRecord);
}

/// Keeps the most recent records, newest first, evicting the oldest past
/// the limit.
#[derive(Clone, Debug, PartialEq)]
pub struct MemHistory {
    records: VecDeque<HistoryRecord>,
    limit: usize,
}

impl MemHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemHistory {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl HistoryStore for MemHistory {
    fn append(&mut self, record: HistoryRecord) {
        self.records.push_front(record);
        self.records.truncate(self.limit);
    }
}
