//! HTTP oracle for a locally hosted Ollama server.

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::oracle::stream::assemble_chunks;
use crate::oracle::ModelOracle;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// [`ModelOracle`] backed by the Ollama `/api/generate` endpoint.
///
/// Each query is one blocking POST bounded by the configured timeout. The
/// streamed NDJSON body is read in full and assembled with
/// [`assemble_chunks`].
#[derive(Debug, Clone)]
pub struct OllamaOracle {
    client: Client,
    config: OracleConfig,
}

impl OllamaOracle {
    /// Creates an oracle for the given configuration.
    ///
    /// # Errors
    /// Returns `ProtocolError` if the HTTP client cannot be initialized.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        // The model runs locally; system proxy settings must not reroute it.
        let client = Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(|e| OracleError::protocol(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// The configuration this oracle was built with.
    #[must_use]
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn transport_error(&self, err: &reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::unavailable(
                &self.config.endpoint,
                format!("timed out after {}s", self.config.timeout.as_secs()),
            )
        } else if err.is_connect() {
            OracleError::unavailable(&self.config.endpoint, "connection failed")
        } else if err.is_request() {
            // Accepted, then closed or reset before any response arrived.
            OracleError::unavailable(&self.config.endpoint, "connection closed before a response arrived")
        } else {
            OracleError::protocol(err.to_string())
        }
    }
}

impl ModelOracle for OllamaOracle {
    #[instrument(skip_all, fields(model = %self.config.model, prompt_len = prompt.len()))]
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "model response received");

        if !status.is_success() {
            return Err(OracleError::status(status.as_u16(), body));
        }
        assemble_chunks(&body)
    }
}
