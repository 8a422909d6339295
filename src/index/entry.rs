//! Index entry and query types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::revision::{Author, DocumentId, Revision, RevisionId};

/// The materialized view of one `(document, state)` pair: the head
/// revision's content plus its commit metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub document_id: DocumentId,
    pub state: String,
    pub revision_id: RevisionId,
    pub content: Value,
    pub author: Author,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IndexEntry {
    /// Build the entry a revision projects to.
    pub fn from_revision(revision: &Revision) -> Self {
        Self {
            document_id: revision.document_id,
            state: revision.state.clone(),
            revision_id: revision.id.clone(),
            content: revision.content.clone(),
            author: revision.author.clone(),
            message: revision.message.clone(),
            timestamp: revision.timestamp,
        }
    }
}

/// A structured search request.
///
/// `terms` match content fields by exact value; `state` restricts the
/// search to entries of one state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub terms: Map<String, Value>,
}

impl SearchQuery {
    /// Match everything in a given state.
    pub fn in_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            terms: Map::new(),
        }
    }

    /// Add an exact-match term on a content field.
    pub fn with_term(mut self, field: impl Into<String>, value: Value) -> Self {
        self.terms.insert(field.into(), value);
        self
    }

    /// Whether an entry satisfies this query.
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        if let Some(state) = &self.state {
            if entry.state != *state {
                return false;
            }
        }
        self.terms
            .iter()
            .all(|(field, value)| entry.content.get(field) == Some(value))
    }
}
