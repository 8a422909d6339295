//! Store error taxonomy
//!
//! Every operation on the store fails with one of these. Conflicts are
//! retried inside the revision graph before surfacing; index projection
//! failures never reach here on the write path (they are logged and
//! swallowed), only `search` reports the index being down.

use thiserror::Error;

use crate::content::ContentError;
use crate::history::HistoryError;
use crate::index::IndexError;
use crate::promotion::PromotionError;
use crate::revision::{CommitError, DocumentId, RevisionId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown document id
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// The state has no revisions yet
    #[error("state has no revisions: '{state}'")]
    StateNotFound { state: String },

    /// Unknown revision id (or one belonging to another document)
    #[error("revision not found: {0}")]
    RevisionNotFound(RevisionId),

    /// CAS race lost repeatedly; the client may retry
    #[error("write conflict on state '{state}' after {attempts} attempts")]
    WriteConflict { state: String, attempts: usize },

    /// Malformed document content
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// Search backend down; reads against the index cannot be served
    #[error("search index unavailable: {0}")]
    IndexUnavailable(String),

    /// Storage backend failed or is inconsistent
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            StoreError::StateNotFound { .. } => "STATE_NOT_FOUND",
            StoreError::RevisionNotFound(_) => "REVISION_NOT_FOUND",
            StoreError::WriteConflict { .. } => "WRITE_CONFLICT",
            StoreError::InvalidContent(_) => "INVALID_CONTENT",
            StoreError::IndexUnavailable(_) => "INDEX_UNAVAILABLE",
            StoreError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// HTTP status for the transport layer
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::DocumentNotFound(_) => 404,
            StoreError::StateNotFound { .. } => 404,
            StoreError::RevisionNotFound(_) => 404,
            StoreError::WriteConflict { .. } => 409,
            StoreError::InvalidContent(_) => 400,
            StoreError::IndexUnavailable(_) => 503,
            StoreError::StorageUnavailable(_) => 500,
        }
    }
}

impl From<ContentError> for StoreError {
    fn from(e: ContentError) -> Self {
        StoreError::InvalidContent(e.to_string())
    }
}

impl From<CommitError> for StoreError {
    fn from(e: CommitError) -> Self {
        match e {
            CommitError::DocumentNotFound(id) => StoreError::DocumentNotFound(id),
            CommitError::InvalidContent(inner) => StoreError::InvalidContent(inner.to_string()),
            CommitError::WriteConflict { state, attempts } => {
                StoreError::WriteConflict { state, attempts }
            }
        }
    }
}

impl From<HistoryError> for StoreError {
    fn from(e: HistoryError) -> Self {
        match e {
            HistoryError::StateNotFound { state } => StoreError::StateNotFound { state },
            HistoryError::RevisionNotFound(id) => StoreError::RevisionNotFound(id),
        }
    }
}

impl From<PromotionError> for StoreError {
    fn from(e: PromotionError) -> Self {
        match e {
            PromotionError::StateNotFound { state } => StoreError::StateNotFound { state },
            PromotionError::RevisionNotFound(id) => StoreError::RevisionNotFound(id),
            PromotionError::Commit(inner) => inner.into(),
        }
    }
}

impl From<IndexError> for StoreError {
    fn from(e: IndexError) -> Self {
        StoreError::IndexUnavailable(e.to_string())
    }
}
