//! Parent-chain traversal
//!
//! Each state's lineage is a linear chain (states never branch
//! internally), so history is a linked-list walk from the head to the
//! root. The iterator fetches one revision per step and holds no
//! backlog, so unbounded histories stream without loading the graph.

use std::sync::Arc;

use thiserror::Error;

use crate::content::ObjectStore;
use crate::revision::{DocumentId, Revision, RevisionId};
use crate::state::StateRegistry;

/// History traversal failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The state has no revisions
    #[error("state has no revisions: '{state}'")]
    StateNotFound { state: String },

    /// A parent pointer led to a missing revision
    #[error("revision not found: {0}")]
    RevisionNotFound(RevisionId),
}

/// Walks state heads and parent chains.
pub struct HistoryResolver {
    objects: Arc<ObjectStore>,
    registry: Arc<StateRegistry>,
}

impl HistoryResolver {
    pub fn new(objects: Arc<ObjectStore>, registry: Arc<StateRegistry>) -> Self {
        Self { objects, registry }
    }

    /// Ordered revisions of one state, most recent first.
    pub fn history(
        &self,
        document_id: &DocumentId,
        state: &str,
    ) -> Result<HistoryIter, HistoryError> {
        let head = self
            .registry
            .head(document_id, state)
            .ok_or_else(|| HistoryError::StateNotFound {
                state: state.to_string(),
            })?;
        Ok(HistoryIter {
            objects: Arc::clone(&self.objects),
            next: Some(head),
        })
    }

    /// Revisions of several states merged into one list, sorted by
    /// timestamp descending; ties break on state name, then revision
    /// id, so the order is total and stable.
    ///
    /// States without revisions contribute nothing. If none of the
    /// listed states have revisions the whole call is `StateNotFound`.
    pub fn history_across(
        &self,
        document_id: &DocumentId,
        states: &[String],
    ) -> Result<Vec<Arc<Revision>>, HistoryError> {
        let mut merged: Vec<Arc<Revision>> = Vec::new();
        let mut found_any = false;

        for state in states {
            match self.history(document_id, state) {
                Ok(iter) => {
                    found_any = true;
                    for revision in iter {
                        merged.push(revision?);
                    }
                }
                Err(HistoryError::StateNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        if !found_any {
            return Err(HistoryError::StateNotFound {
                state: states.join(", "),
            });
        }

        merged.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.state.cmp(&b.state))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(merged)
    }
}

/// Lazy walk from a head revision back to the lineage root.
#[derive(Debug)]
pub struct HistoryIter {
    objects: Arc<ObjectStore>,
    next: Option<RevisionId>,
}

impl Iterator for HistoryIter {
    type Item = Result<Arc<Revision>, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        match self.objects.get(&id) {
            Some(revision) => {
                self.next = revision.parent.clone();
                Some(Ok(revision))
            }
            None => Some(Err(HistoryError::RevisionNotFound(id))),
        }
    }
}
