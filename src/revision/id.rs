//! Document and revision identifiers
//!
//! Document ids are opaque UUIDs assigned at creation. Revision ids are
//! hex SHA-256 digests over the full revision record (document, state,
//! parent, canonical content, author, message, timestamp), so an id can
//! never collide across documents or states.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::content::canonical_bytes;

use super::record::Author;

/// Opaque, globally unique document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh document id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content-derived revision identifier (hex SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    /// Derive the id for a revision record.
    ///
    /// Every field is length-prefixed before hashing so adjacent fields
    /// cannot alias each other.
    pub fn derive(
        document_id: &DocumentId,
        state: &str,
        parent: Option<&RevisionId>,
        content: &Value,
        author: &Author,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut hasher = Sha256::new();

        update_field(&mut hasher, document_id.to_string().as_bytes());
        update_field(&mut hasher, state.as_bytes());
        update_field(
            &mut hasher,
            parent.map(|p| p.as_str()).unwrap_or("").as_bytes(),
        );
        update_field(&mut hasher, &canonical_bytes(content));
        update_field(&mut hasher, author.name.as_bytes());
        update_field(&mut hasher, author.email.as_bytes());
        update_field(&mut hasher, message.as_bytes());
        update_field(&mut hasher, &timestamp.timestamp_micros().to_le_bytes());

        let digest = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{:02x}", byte));
        }
        Self(hex)
    }

    /// Wrap an already-derived id (deserialized or test-provided).
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
