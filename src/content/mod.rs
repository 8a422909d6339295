//! Content Object Store subsystem
//!
//! Holds the canonical in-memory state of all revisions: an
//! append-only, content-addressed arena of immutable records plus a
//! directory of known documents ordered by last update.
//!
//! # Design Principles
//!
//! - Append-only (revisions are never mutated or deleted)
//! - Write-then-publish (a revision is fully built before it becomes
//!   visible; readers never observe partial writes)
//! - Content validated once, at the edge of the write path
//! - Directory answers "list by updated_at desc" without graph walks

mod directory;
mod object_store;
mod value;

pub use directory::{DocumentDirectory, DocumentEntry};
pub use object_store::ObjectStore;
pub use value::{canonical_bytes, validate, ContentError};
