//! Append-only, content-addressed revision arena
//!
//! Revisions are fully built before they are published into the arena,
//! and never mutated or removed afterwards. Because ids are derived
//! from the record itself, re-inserting an identical record is a no-op;
//! readers can hold `Arc<Revision>` across any number of writes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::revision::{Revision, RevisionId};

/// Immutable revision storage, keyed by revision id.
#[derive(Debug)]
pub struct ObjectStore {
    revisions: RwLock<HashMap<RevisionId, Arc<Revision>>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            revisions: RwLock::new(HashMap::new()),
        }
    }

    /// Publish a revision into the arena.
    ///
    /// Content addressing makes this idempotent: if the id is already
    /// present the existing record is returned (same id implies the
    /// same record).
    pub fn put(&self, revision: Revision) -> Arc<Revision> {
        let mut revisions = self
            .revisions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(
            revisions
                .entry(revision.id.clone())
                .or_insert_with(|| Arc::new(revision)),
        )
    }

    /// Fetch a revision by id.
    pub fn get(&self, id: &RevisionId) -> Option<Arc<Revision>> {
        let revisions = self
            .revisions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        revisions.get(id).cloned()
    }

    /// Whether a revision exists.
    pub fn contains(&self, id: &RevisionId) -> bool {
        let revisions = self
            .revisions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        revisions.contains_key(id)
    }

    /// Number of stored revisions (reachable or not).
    pub fn len(&self) -> usize {
        let revisions = self
            .revisions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::{Author, DocumentId};
    use chrono::Utc;
    use serde_json::json;

    fn sample_revision() -> Revision {
        Revision::new(
            DocumentId::new(),
            "master",
            None,
            json!({"title": "Hello"}),
            Author::new("Ada", "ada@example.com"),
            "init",
            Utc::now(),
        )
    }

    #[test]
    fn test_put_then_get() {
        let store = ObjectStore::new();
        let revision = sample_revision();
        let id = revision.id.clone();

        let stored = store.put(revision);
        assert_eq!(stored.id, id);

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.content["title"], "Hello");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = ObjectStore::new();
        assert!(store.get(&RevisionId::from_raw("missing")).is_none());
        assert!(!store.contains(&RevisionId::from_raw("missing")));
    }

    #[test]
    fn test_put_is_idempotent() {
        let store = ObjectStore::new();
        let revision = sample_revision();

        let first = store.put(revision.clone());
        let second = store.put(revision);

        assert_eq!(store.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_revisions_coexist() {
        let store = ObjectStore::new();
        let a = sample_revision();
        let b = sample_revision();
        assert_ne!(a.id, b.id);

        store.put(a.clone());
        store.put(b.clone());

        assert_eq!(store.len(), 2);
        assert!(store.contains(&a.id));
        assert!(store.contains(&b.id));
    }
}
