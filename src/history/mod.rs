//! History Resolver subsystem
//!
//! Answers "ordered revisions for a state" by lazily walking parent
//! pointers from the state's head, and "ordered revisions across
//! states" by merging full lineages sorted newest-first.

mod resolver;

pub use resolver::{HistoryError, HistoryIter, HistoryResolver};
