//! # KnowLabel - Cosmetic Ingredient Analyzer
//!
//! KnowLabel checks cosmetic ingredient lists against a curated knowledge
//! base and asks a locally hosted language model about anything the
//! knowledge base does not cover. A chat mode answers free-text questions,
//! preferring curated data whenever a known ingredient is mentioned.
//!
//! ## Core Concepts
//!
//! - **KnowledgeBase**: Immutable map from normalized name to curated record
//! - **IngredientRecord**: Verdict (beneficial / harmful / unknown), description, alternatives
//! - **ModelOracle**: "Prompt in, text out" capability with typed failures
//! - **Resolver**: Tokenizes an ingredient list and merges curated and model-made records
//! - **Chat**: Substring dispatch between curated answers and the model
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use knowlabel::{Analyzer, KnowledgeBase, OllamaOracle, OracleConfig};
//!
//! let kb = Arc::new(KnowledgeBase::from_csv_path("ingredients.csv")?);
//! let analyzer = Analyzer::new(kb, OllamaOracle::new(OracleConfig::default())?);
//!
//! for (name, record) in analyzer.analyze("Water, Glycerin\nParabens").iter() {
//!     println!("{name}: {}", record.beneficial);
//! }
//! println!("{}", analyzer.chat("is glycerin safe?"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod knowledge;
pub mod record;

// Model access
pub mod config;
pub mod oracle;

// Operations
pub mod chat;
pub mod resolver;
pub mod session;

// Front-end helpers
pub mod render;

// Re-export primary types at crate root for convenience
pub use chat::answer;
pub use config::{KnowLabelConfig, OracleConfig};
pub use error::{ConfigError, DataSourceError, KnowLabelError, KnowLabelResult, OracleError};
pub use knowledge::{normalize_name, KnowledgeBase, KnowledgeBaseCache};
pub use oracle::{ModelOracle, OllamaOracle};
pub use record::{Benefit, IngredientRecord};
pub use resolver::{resolve, tokenize, ResolutionResult};
pub use session::Analyzer;
