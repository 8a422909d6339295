//! Observability for stratadb
//!
//! - Structured JSON logs, one line per event
//! - Deterministic key ordering
//! - Typed event catalog
//! - Synchronous, no buffering

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
