use std::collections::{HashSet, VecDeque};

use crate::catalog::WordEntry;

/// Missed or skipped words awaiting re-presentation. FIFO, except the
/// selector may rotate the head to the tail to avoid an immediate repeat.
///
/// Invariants: no two entries share a lowercased word, and a word in the
/// session's mastered set is never inserted or retained.
#[derive(Clone, Debug, Default)]
pub struct ReviewQueue {
    entries: VecDeque<WordEntry>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a word for review. No-op if the word is already queued or has
    /// been mastered this session.
    pub fn push(&mut self, entry: WordEntry, mastered: &HashSet<String>) {
        let key = entry.key();
        if mastered.contains(&key) {
            return;
        }
        if self.entries.iter().any(|e| e.key() == key) {
            return;
        }
        self.entries.push_back(entry);
    }

    /// Drop the entry for `key` (lowercased word), if present. Called when a
    /// queued word gets spelled correctly through random selection.
    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|e| e.key() != key);
    }

    pub fn pop_front(&mut self) -> Option<WordEntry> {
        self.entries.pop_front()
    }

    pub fn front(&self) -> Option<&WordEntry> {
        self.entries.front()
    }

    /// Move the head to the tail.
    pub fn rotate(&mut self) {
        if let Some(head) = self.entries.pop_front() {
            self.entries.push_back(head);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
