//! Revision record types
//!
//! A revision is an immutable snapshot of a document's content under
//! one state, linked to the state's previous revision by a parent
//! pointer. Once built, a revision's fields never change; the store
//! shares revisions as `Arc<Revision>` and exposes no mutators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::{DocumentId, RevisionId};

/// Who made a revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// An immutable content snapshot in a state's lineage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Content-derived identifier, unique across the whole store
    pub id: RevisionId,
    /// Owning document
    pub document_id: DocumentId,
    /// The state this revision was committed under
    pub state: String,
    /// The state's previous head; `None` only for the lineage root
    pub parent: Option<RevisionId>,
    /// Opaque key-value content
    pub content: Value,
    /// Commit authorship
    pub author: Author,
    /// Commit message
    pub message: String,
    /// Store-assigned commit time (metadata only; the registry orders
    /// commits, not the clock)
    pub timestamp: DateTime<Utc>,
}

impl Revision {
    /// Build a revision, deriving its id from the remaining fields.
    pub fn new(
        document_id: DocumentId,
        state: impl Into<String>,
        parent: Option<RevisionId>,
        content: Value,
        author: Author,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let state = state.into();
        let message = message.into();
        let id = RevisionId::derive(
            &document_id,
            &state,
            parent.as_ref(),
            &content,
            &author,
            &message,
            timestamp,
        );
        Self {
            id,
            document_id,
            state,
            parent,
            content,
            author,
            message,
            timestamp,
        }
    }

    /// True for the first revision in a state's lineage.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
