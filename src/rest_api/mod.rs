//! # REST API
//!
//! Thin axum transport over the DocumentStore: route matching, body
//! parsing, and status-code mapping. No versioning logic lives here.

mod errors;
mod request;
mod response;
mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use request::{CreateDocumentRequest, PromoteRequest, UpdateDocumentRequest};
pub use response::{DocumentResponse, RevisionResponse, SearchHit};
pub use server::{router, RestServer};
