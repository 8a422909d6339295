//! Index Projector subsystem
//!
//! On every successful commit the store projects the revision into a
//! search index keyed by `(document, state)`. The canonical history
//! lives in the revision graph; the index is a best-effort, eventually
//! consistent materialized view. Projection failures are logged and
//! swallowed so a write never fails because search is down.

mod entry;
mod memory;
mod projector;

pub use entry::{IndexEntry, SearchQuery};
pub use memory::InMemoryIndex;
pub use projector::IndexProjector;

use thiserror::Error;

/// Search index failures
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The index backend rejected or could not service the call
    #[error("search index unavailable: {0}")]
    Unavailable(String),
}

/// The seam to the external search service.
///
/// Implementations are expected to apply their own bounded I/O
/// timeouts; the projector adds bounded retries on top.
pub trait SearchIndex: Send + Sync {
    /// Upsert the latest entry for `(document, state)`.
    fn upsert(&self, entry: IndexEntry) -> Result<(), IndexError>;

    /// Query current entries, newest first.
    fn search(&self, query: &SearchQuery) -> Result<Vec<IndexEntry>, IndexError>;
}
