//! Commit protocol
//!
//! A commit builds a revision against the state's current head,
//! publishes it into the object store, then advances the state pointer
//! by compare-and-swap. Publish happens before the pointer moves, so a
//! reader can never follow a pointer to a missing revision. Losing the
//! CAS retries the whole build against the new head, a bounded number
//! of times.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use crate::content::{self, ContentError, DocumentDirectory, ObjectStore};
use crate::index::IndexProjector;
use crate::observability::{Event, Logger};
use crate::state::{AdvanceError, StateRegistry};

use super::id::DocumentId;
use super::record::{Author, Revision};

/// Commit failures
#[derive(Debug, Error)]
pub enum CommitError {
    /// The document was never created
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Content failed validation
    #[error(transparent)]
    InvalidContent(#[from] ContentError),

    /// Concurrent writers kept moving the head; retries exhausted
    #[error("write conflict on state '{state}' after {attempts} attempts")]
    WriteConflict { state: String, attempts: usize },
}

/// Builds revisions and advances state pointers.
pub struct RevisionGraph {
    objects: Arc<ObjectStore>,
    registry: Arc<StateRegistry>,
    directory: Arc<DocumentDirectory>,
    projector: IndexProjector,
    max_retries: usize,
}

impl RevisionGraph {
    pub fn new(
        objects: Arc<ObjectStore>,
        registry: Arc<StateRegistry>,
        directory: Arc<DocumentDirectory>,
        projector: IndexProjector,
        max_retries: usize,
    ) -> Self {
        Self {
            objects,
            registry,
            directory,
            projector,
            max_retries,
        }
    }

    /// Commit new content to a state.
    ///
    /// The state is created implicitly on its first commit. The caller
    /// never supplies a timestamp; commit time is read from the clock
    /// here, and ordering comes from the registry regardless.
    pub fn commit(
        &self,
        document_id: &DocumentId,
        state: &str,
        content: Value,
        author: Author,
        message: &str,
    ) -> Result<Arc<Revision>, CommitError> {
        content::validate(&content)?;
        if !self.directory.contains(document_id) {
            return Err(CommitError::DocumentNotFound(*document_id));
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            let head = self.registry.head(document_id, state);
            let timestamp = Utc::now();
            let revision = Revision::new(
                *document_id,
                state,
                head.clone(),
                content.clone(),
                author.clone(),
                message,
                timestamp,
            );
            let published = self.objects.put(revision);

            match self
                .registry
                .advance(document_id, state, head.as_ref(), published.id.clone())
            {
                Ok(()) => {
                    self.directory.touch(document_id, state, timestamp);
                    Logger::info(
                        Event::CommitApplied,
                        &[
                            ("document_id", &document_id.to_string()),
                            ("revision_id", published.id.as_str()),
                            ("state", state),
                        ],
                    );
                    self.projector.project(&published);
                    return Ok(published);
                }
                Err(AdvanceError::Conflict { .. }) if attempts <= self.max_retries => {
                    // The losing revision stays in the append-only
                    // arena but nothing points at it
                    Logger::warn(
                        Event::CommitConflict,
                        &[
                            ("attempt", &attempts.to_string()),
                            ("document_id", &document_id.to_string()),
                            ("state", state),
                        ],
                    );
                }
                Err(AdvanceError::Conflict { .. }) => {
                    Logger::error(
                        Event::CommitFailed,
                        &[
                            ("attempts", &attempts.to_string()),
                            ("document_id", &document_id.to_string()),
                            ("state", state),
                        ],
                    );
                    return Err(CommitError::WriteConflict {
                        state: state.to_string(),
                        attempts,
                    });
                }
            }
        }
    }
}
