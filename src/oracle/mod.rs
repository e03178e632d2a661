//! The model oracle: "given a prompt, return an answer or a typed failure".
//!
//! The resolver and chat dispatcher depend only on [`ModelOracle`]. The
//! production implementation is [`OllamaOracle`], which talks to a locally
//! hosted model over HTTP; tests substitute scripted oracles.

mod ollama;
pub mod stream;

pub use ollama::OllamaOracle;

use tracing::warn;

use crate::error::OracleError;

/// Text-answering capability backed by a generative model.
///
/// Implementations must be safe to share across sessions; a call either
/// completes, times out (reported as `ServiceUnavailable`) or fails.
pub trait ModelOracle: Send + Sync {
    /// Asks the model a question.
    ///
    /// # Errors
    /// - `ServiceUnavailable`: the service cannot be reached or timed out
    /// - `EmptyResponse`: the service produced no usable text
    /// - `ProtocolError`: non-success status or unusable payload
    fn query(&self, prompt: &str) -> Result<String, OracleError>;
}

impl<T: ModelOracle + ?Sized> ModelOracle for &T {
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        (**self).query(prompt)
    }
}

impl<T: ModelOracle + ?Sized> ModelOracle for Box<T> {
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        (**self).query(prompt)
    }
}

impl<T: ModelOracle + ?Sized> ModelOracle for std::sync::Arc<T> {
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        (**self).query(prompt)
    }
}

/// Prompt used to explain an ingredient missing from the knowledge base.
#[must_use]
pub fn ingredient_prompt(candidate: &str) -> String {
    format!("What can you tell me about the ingredient '{candidate}' in cosmetics or skincare?")
}

/// Queries the oracle and degrades any failure to its user-readable text.
///
/// This is the boundary past which oracle errors are never propagated.
pub fn ask(oracle: &dyn ModelOracle, prompt: &str) -> String {
    match oracle.query(prompt) {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, retryable = err.is_retryable(), "model oracle call failed");
            err.to_string()
        }
    }
}
