//! State Registry subsystem
//!
//! States are named, mutable pointers from `(document, state name)` to
//! the latest revision of that state's lineage (branch analogues). The
//! registry's compare-and-swap is the single write-concurrency control
//! in the store: a commit only lands if the head it was built against
//! is still the head.

mod registry;

pub use registry::{AdvanceError, StateRegistry};

/// The state a document's first revision is committed under.
pub const DEFAULT_STATE: &str = "master";
