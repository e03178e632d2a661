//! The curated ingredient knowledge base.
//!
//! A [`KnowledgeBase`] maps normalized ingredient names to curated
//! [`IngredientRecord`](crate::record::IngredientRecord)s. It is built once
//! (usually by the CSV [`loader`]), shared read-only behind an `Arc`, and
//! never mutated afterwards. [`KnowledgeBaseCache`] provides the
//! build-once-per-session lifecycle.

mod base;
pub mod cache;
pub mod loader;

pub use base::{normalize_name, KnowledgeBase, KnowledgeBaseBuilder};
pub use cache::KnowledgeBaseCache;
