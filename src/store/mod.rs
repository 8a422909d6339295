//! DocumentStore facade
//!
//! Composes the content store, revision graph, state registry, history
//! resolver, promotion engine, and index projector behind the operation
//! surface the transport layer consumes. The facade owns every shared
//! component; nothing in the core is ambient global state.

mod document_store;
mod errors;

pub use document_store::{DocumentStore, DocumentSummary};
pub use errors::{StoreError, StoreResult};
