//! Assembly of streamed model output.
//!
//! The generate endpoint answers with newline-delimited JSON objects, each
//! optionally carrying a `response` fragment. Fragments are concatenated in
//! delivery order; blank or unparsable lines are skipped. Only an answer
//! that is blank after assembly is an error.

use serde::Deserialize;
use tracing::{trace, warn};

use crate::error::OracleError;

/// One line of a streamed generate response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateChunk {
    /// Text fragment carried by this chunk.
    #[serde(default)]
    pub response: String,
    /// Set on the final chunk.
    #[serde(default)]
    pub done: bool,
}

/// Concatenates the `response` fragments of an NDJSON body.
///
/// # Errors
/// Returns `EmptyResponse` when the assembled text is blank.
pub fn assemble_chunks(body: &str) -> Result<String, OracleError> {
    let mut text = String::new();
    let mut skipped = 0usize;

    for (idx, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<GenerateChunk>(line) {
            Ok(chunk) => {
                text.push_str(&chunk.response);
                if chunk.done {
                    trace!(line = idx + 1, "final chunk received");
                }
            }
            Err(err) => {
                skipped += 1;
                trace!(line = idx + 1, error = %err, "skipping unparsable chunk");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped unparsable chunks in model response");
    }
    if text.trim().is_empty() {
        return Err(OracleError::EmptyResponse);
    }
    Ok(text)
}
