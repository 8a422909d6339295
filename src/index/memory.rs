//! In-memory search index
//!
//! The reference `SearchIndex` implementation used by tests and by
//! `serve` when no external index is wired in. Keeps exactly one entry
//! per `(document, state)` pair, like an upsert-keyed search engine
//! index would.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::revision::DocumentId;

use super::entry::{IndexEntry, SearchQuery};
use super::{IndexError, SearchIndex};

type EntryKey = (DocumentId, String);

/// Upsert-keyed in-memory index.
pub struct InMemoryIndex {
    entries: RwLock<HashMap<EntryKey, IndexEntry>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of indexed `(document, state)` pairs.
    pub fn len(&self) -> usize {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct lookup of one pair's entry.
    pub fn entry(&self, document_id: &DocumentId, state: &str) -> Option<IndexEntry> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(&(*document_id, state.to_string())).cloned()
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex for InMemoryIndex {
    fn upsert(&self, entry: IndexEntry) -> Result<(), IndexError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert((entry.document_id, entry.state.clone()), entry);
        Ok(())
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<IndexEntry>, IndexError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut hits: Vec<IndexEntry> = entries
            .values()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        drop(entries);

        hits.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.document_id.cmp(&b.document_id))
                .then_with(|| a.state.cmp(&b.state))
        });
        Ok(hits)
    }
}
