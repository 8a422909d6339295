//! Revision Graph subsystem
//!
//! Revisions are immutable, parent-linked snapshots of a document's
//! content (commit analogues). The graph builds new revisions against a
//! state's current head and advances the state pointer through the
//! registry's compare-and-swap, retrying a bounded number of times when
//! it loses the race.
//!
//! # Invariants Enforced
//!
//! - A revision's parent is the head observed at commit time
//! - Timestamps are assigned by the store, never by the caller
//! - Revision ids are derived from the full record and globally unique
//! - The registry, not wall-clock time, orders commits

mod graph;
mod id;
mod record;

pub use graph::{CommitError, RevisionGraph};
pub use id::{DocumentId, RevisionId};
pub use record::{Author, Revision};
