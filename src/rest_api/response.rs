//! REST response bodies

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::index::IndexEntry;
use crate::revision::{Author, DocumentId, Revision, RevisionId};

/// Document-shaped response: id, the revision backing it, and content.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: DocumentId,
    pub revision_id: RevisionId,
    pub content: Value,
}

impl DocumentResponse {
    pub fn from_revision(revision: &Revision) -> Self {
        Self {
            id: revision.document_id,
            revision_id: revision.id.clone(),
            content: revision.content.clone(),
        }
    }
}

/// Full revision metadata plus content.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionResponse {
    pub id: RevisionId,
    pub document_id: DocumentId,
    pub state: String,
    pub parent: Option<RevisionId>,
    pub author: Author,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub content: Value,
}

impl RevisionResponse {
    pub fn from_revision(revision: &Revision) -> Self {
        Self {
            id: revision.id.clone(),
            document_id: revision.document_id,
            state: revision.state.clone(),
            parent: revision.parent.clone(),
            author: revision.author.clone(),
            message: revision.message.clone(),
            timestamp: revision.timestamp,
            content: revision.content.clone(),
        }
    }
}

/// A search result: document id plus its indexed content.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: DocumentId,
    pub state: String,
    pub content: Value,
}

impl SearchHit {
    pub fn from_entry(entry: &IndexEntry) -> Self {
        Self {
            id: entry.document_id,
            state: entry.state.clone(),
            content: entry.content.clone(),
        }
    }
}
