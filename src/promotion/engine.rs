//! Snapshot-copy promotion

use std::sync::Arc;

use thiserror::Error;

use crate::content::ObjectStore;
use crate::observability::{Event, Logger};
use crate::revision::{Author, CommitError, DocumentId, Revision, RevisionGraph, RevisionId};
use crate::state::StateRegistry;

/// Promotion failures
#[derive(Debug, Error)]
pub enum PromotionError {
    /// The source state has no revisions to promote
    #[error("state has no revisions: '{state}'")]
    StateNotFound { state: String },

    /// The source head points at a missing revision
    #[error("revision not found: {0}")]
    RevisionNotFound(RevisionId),

    /// The commit into the target state failed
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Copies one state's head content into another state's lineage.
pub struct PromotionEngine {
    graph: Arc<RevisionGraph>,
    registry: Arc<StateRegistry>,
    objects: Arc<ObjectStore>,
}

impl PromotionEngine {
    pub fn new(
        graph: Arc<RevisionGraph>,
        registry: Arc<StateRegistry>,
        objects: Arc<ObjectStore>,
    ) -> Self {
        Self {
            graph,
            registry,
            objects,
        }
    }

    /// Promote `from_state`'s current content into `to_state`.
    ///
    /// The new revision's parent is `to_state`'s own prior head (or
    /// none), never the source revision; id, timestamp, author and
    /// message belong to the promotion event itself.
    pub fn promote(
        &self,
        document_id: &DocumentId,
        from_state: &str,
        to_state: &str,
        author: Author,
        message: &str,
    ) -> Result<Arc<Revision>, PromotionError> {
        let source_head = self
            .registry
            .head(document_id, from_state)
            .ok_or_else(|| PromotionError::StateNotFound {
                state: from_state.to_string(),
            })?;
        let source = self
            .objects
            .get(&source_head)
            .ok_or(PromotionError::RevisionNotFound(source_head))?;

        let promoted = self.graph.commit(
            document_id,
            to_state,
            source.content.clone(),
            author,
            message,
        )?;

        Logger::info(
            Event::PromotionApplied,
            &[
                ("document_id", &document_id.to_string()),
                ("from_state", from_state),
                ("revision_id", promoted.id.as_str()),
                ("source_revision_id", source.id.as_str()),
                ("to_state", to_state),
            ],
        );
        Ok(promoted)
    }
}
