//! Document directory
//!
//! Tracks every known document, the timestamp of its most recent
//! revision across all states, and which state that revision landed in.
//! Listing documents newest-first reads this directory instead of
//! walking the revision graph.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::revision::DocumentId;

/// A directory row: one known document and its freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub id: DocumentId,
    /// State that received the most recent commit
    pub last_state: String,
    /// Timestamp of the most recent commit across all states
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Freshness {
    last_state: String,
    updated_at: DateTime<Utc>,
}

/// Registry of known documents, ordered on read by `updated_at` desc.
pub struct DocumentDirectory {
    entries: RwLock<HashMap<DocumentId, Freshness>>,
}

impl DocumentDirectory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a newly created document.
    pub fn register(&self, id: DocumentId, state: impl Into<String>, at: DateTime<Utc>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.entry(id).or_insert(Freshness {
            last_state: state.into(),
            updated_at: at,
        });
    }

    /// Whether the document is known.
    pub fn contains(&self, id: &DocumentId) -> bool {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.contains_key(id)
    }

    /// Record a successful commit: advances `updated_at` monotonically
    /// and remembers which state it landed in.
    pub fn touch(&self, id: &DocumentId, state: &str, at: DateTime<Utc>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(freshness) = entries.get_mut(id) {
            if at >= freshness.updated_at {
                freshness.updated_at = at;
                freshness.last_state = state.to_string();
            }
        }
    }

    /// Last update time for a document.
    pub fn updated_at(&self, id: &DocumentId) -> Option<DateTime<Utc>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(id).map(|f| f.updated_at)
    }

    /// All documents, most recently updated first, with `offset` rows
    /// skipped and at most `limit` rows returned. Ties break on id so
    /// pagination is stable.
    pub fn list(&self, limit: usize, offset: usize) -> Vec<DocumentEntry> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut rows: Vec<DocumentEntry> = entries
            .iter()
            .map(|(id, f)| DocumentEntry {
                id: *id,
                last_state: f.last_state.clone(),
                updated_at: f.updated_at,
            })
            .collect();
        drop(entries);

        rows.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        rows.into_iter().skip(offset).take(limit).collect()
    }

    /// Number of known documents.
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
}

impl Default for DocumentDirectory {
    fn default() -> Self {
        Self::new()
    }
}
