//! stratadb - A versioned document store with git-like named states
//!
//! Documents are chains of immutable content revisions. Each document
//! carries one or more named states (branch analogues) pointing at the
//! head of an independent lineage. Writes append revisions, states
//! advance by compare-and-swap, and promotions copy content from one
//! state's head into a new revision on another state's own lineage.

pub mod cli;
pub mod config;
pub mod content;
pub mod history;
pub mod index;
pub mod observability;
pub mod promotion;
pub mod rest_api;
pub mod retry;
pub mod revision;
pub mod state;
pub mod store;
