//! Best-effort index projection
//!
//! Runs after the state pointer has advanced. The write is already
//! durable at that point, so projection failures are logged and
//! swallowed; the index catches up on the next successful upsert for
//! the same `(document, state)` pair.

use std::sync::Arc;

use crate::observability::{Event, Logger};
use crate::retry::RetryPolicy;
use crate::revision::Revision;

use super::entry::IndexEntry;
use super::SearchIndex;

/// Publishes committed revisions into the search index.
pub struct IndexProjector {
    index: Arc<dyn SearchIndex>,
    policy: RetryPolicy,
}

impl IndexProjector {
    pub fn new(index: Arc<dyn SearchIndex>, policy: RetryPolicy) -> Self {
        Self { index, policy }
    }

    /// Project a committed revision. Returns whether the index
    /// acknowledged the upsert; the caller must not fail the write
    /// either way.
    pub fn project(&self, revision: &Revision) -> bool {
        let document_id = revision.document_id.to_string();
        let revision_id = revision.id.to_string();

        let result = self.policy.run(
            || self.index.upsert(IndexEntry::from_revision(revision)),
            |attempt, err| {
                Logger::warn(
                    Event::IndexProjectionRetry,
                    &[
                        ("attempt", &attempt.to_string()),
                        ("document_id", &document_id),
                        ("reason", &err.to_string()),
                        ("state", &revision.state),
                    ],
                );
            },
        );

        match result {
            Ok(()) => true,
            Err(err) => {
                Logger::error(
                    Event::IndexProjectionFailed,
                    &[
                        ("document_id", &document_id),
                        ("reason", &err.to_string()),
                        ("revision_id", &revision_id),
                        ("state", &revision.state),
                    ],
                );
                false
            }
        }
    }
}
