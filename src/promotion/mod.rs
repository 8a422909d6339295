//! Promotion Engine subsystem
//!
//! Promotion transplants content, not lineage: the source state's head
//! content is committed as a brand-new revision on the target state's
//! own chain, with the promotion's author and message. The target's
//! history shows the promotion as a first-class event.

mod engine;

pub use engine::{PromotionEngine, PromotionError};
