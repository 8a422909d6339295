//! State pointer map with per-entry compare-and-swap
//!
//! Each `(document, state)` pair has its own lock. The outer map lock
//! is held only long enough to find or create an entry, so commits to
//! different pairs never contend; commits to the same pair contend only
//! at the swap itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use crate::revision::{DocumentId, RevisionId};

type StateKey = (DocumentId, String);
type Head = Arc<Mutex<Option<RevisionId>>>;

/// Compare-and-swap failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvanceError {
    /// The pointer moved since the caller read it.
    #[error("state head moved: expected {expected:?}, found {actual:?}")]
    Conflict {
        expected: Option<RevisionId>,
        actual: Option<RevisionId>,
    },
}

/// Mutable `(document, state) -> head revision` map.
pub struct StateRegistry {
    entries: RwLock<HashMap<StateKey, Head>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn entry(&self, document_id: &DocumentId, state: &str) -> Head {
        {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(head) = entries.get(&(*document_id, state.to_string())) {
                return Arc::clone(head);
            }
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(
            entries
                .entry((*document_id, state.to_string()))
                .or_default(),
        )
    }

    /// Current head of a state, `None` before the first commit.
    pub fn head(&self, document_id: &DocumentId, state: &str) -> Option<RevisionId> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let head = entries.get(&(*document_id, state.to_string()))?;
        let guard = head.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    /// Atomically advance a state pointer.
    ///
    /// Succeeds only if the current head still equals `expected`
    /// (both-absent counts as equal, covering the first-ever write).
    pub fn advance(
        &self,
        document_id: &DocumentId,
        state: &str,
        expected: Option<&RevisionId>,
        new: RevisionId,
    ) -> Result<(), AdvanceError> {
        let entry = self.entry(document_id, state);
        let mut guard = entry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if guard.as_ref() != expected {
            return Err(AdvanceError::Conflict {
                expected: expected.cloned(),
                actual: guard.clone(),
            });
        }

        *guard = Some(new);
        Ok(())
    }

    /// Whether a state has at least one revision.
    pub fn has_state(&self, document_id: &DocumentId, state: &str) -> bool {
        self.head(document_id, state).is_some()
    }

    /// Names of all states of a document that have revisions, sorted.
    pub fn states_of(&self, document_id: &DocumentId) -> Vec<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut states: Vec<String> = entries
            .iter()
            .filter(|((doc, _), head)| {
                doc == document_id
                    && head
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .is_some()
            })
            .map(|((_, state), _)| state.clone())
            .collect();
        states.sort();
        states
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid(s: &str) -> RevisionId {
        RevisionId::from_raw(s)
    }

    #[test]
    fn test_head_absent_before_first_write() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();
        assert_eq!(registry.head(&doc, "master"), None);
        assert!(!registry.has_state(&doc, "master"));
    }

    #[test]
    fn test_first_write_expects_absent_head() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();

        registry.advance(&doc, "master", None, rid("r1")).unwrap();
        assert_eq!(registry.head(&doc, "master"), Some(rid("r1")));
    }

    #[test]
    fn test_advance_succeeds_against_current_head() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();

        registry.advance(&doc, "master", None, rid("r1")).unwrap();
        registry
            .advance(&doc, "master", Some(&rid("r1")), rid("r2"))
            .unwrap();
        assert_eq!(registry.head(&doc, "master"), Some(rid("r2")));
    }

    #[test]
    fn test_advance_conflicts_on_stale_expectation() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();

        registry.advance(&doc, "master", None, rid("r1")).unwrap();

        let err = registry
            .advance(&doc, "master", None, rid("r2"))
            .unwrap_err();
        assert_eq!(
            err,
            AdvanceError::Conflict {
                expected: None,
                actual: Some(rid("r1")),
            }
        );

        // The loser did not overwrite the winner
        assert_eq!(registry.head(&doc, "master"), Some(rid("r1")));
    }

    #[test]
    fn test_states_are_independent() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();

        registry.advance(&doc, "master", None, rid("m1")).unwrap();
        registry.advance(&doc, "published", None, rid("p1")).unwrap();

        assert_eq!(registry.head(&doc, "master"), Some(rid("m1")));
        assert_eq!(registry.head(&doc, "published"), Some(rid("p1")));
    }

    #[test]
    fn test_documents_are_independent() {
        let registry = StateRegistry::new();
        let a = DocumentId::new();
        let b = DocumentId::new();

        registry.advance(&a, "master", None, rid("a1")).unwrap();
        assert_eq!(registry.head(&b, "master"), None);
    }

    #[test]
    fn test_states_of_sorted_and_filtered() {
        let registry = StateRegistry::new();
        let doc = DocumentId::new();
        let other = DocumentId::new();

        registry.advance(&doc, "published", None, rid("p1")).unwrap();
        registry.advance(&doc, "master", None, rid("m1")).unwrap();
        registry.advance(&other, "master", None, rid("x1")).unwrap();

        assert_eq!(registry.states_of(&doc), vec!["master", "published"]);
    }

    #[test]
    fn test_concurrent_cas_exactly_one_winner() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(StateRegistry::new());
        let doc = DocumentId::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.advance(&doc, "master", None, rid(&format!("r{}", i)))
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(registry.head(&doc, "master").is_some());
    }
}
