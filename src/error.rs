//! Error types for KnowLabel.
//!
//! All errors are strongly typed using thiserror. Data-source errors are
//! fatal (nothing can be analyzed without a knowledge base); oracle errors
//! are recoverable and degrade to their display text at the resolver and
//! chat boundaries.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a knowledge base from its tabular source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Knowledge base file '{}' not found", .path.display())]
    NotFound {
        path: PathBuf,
    },

    #[error("Failed to read knowledge base '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column '{column}' is missing from the knowledge base header")]
    MissingColumn {
        column: String,
    },

    #[error("Malformed knowledge base row at line {line}: {reason}")]
    Malformed {
        line: u64,
        reason: String,
    },
}

/// Failures of the model oracle.
///
/// The `Display` text of each variant is what end users see in place of a
/// model answer, so it is phrased for them rather than for developers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("Model server not reachable at {endpoint} ({reason}). Please run `ollama serve` first.")]
    ServiceUnavailable {
        endpoint: String,
        reason: String,
    },

    #[error("No response from model (check memory or prompt length).")]
    EmptyResponse,

    #[error("{}", protocol_message(.status, .message))]
    ProtocolError {
        status: Option<u16>,
        message: String,
    },
}

fn protocol_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("API Error: {code} - {message}"),
        None => format!("Error: {message}"),
    }
}

impl OracleError {
    /// Creates a `ServiceUnavailable` error.
    #[must_use]
    pub fn unavailable(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ProtocolError` for a non-success HTTP status.
    #[must_use]
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::ProtocolError {
            status: Some(code),
            message: body.into(),
        }
    }

    /// Creates a `ProtocolError` without an HTTP status.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            status: None,
            message: message.into(),
        }
    }

    /// Returns true if asking again later could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceUnavailable { .. } => true,
            Self::ProtocolError { status: Some(code), .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Configuration errors (environment overrides, CLI values).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Top-level error type for KnowLabel.
#[derive(Debug, Error)]
pub enum KnowLabelError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),
}

impl KnowLabelError {
    /// Returns true if this is a (fatal) data-source error.
    #[must_use]
    pub const fn is_data_source(&self) -> bool {
        matches!(self, Self::DataSource(_))
    }

    /// Returns true if this is an oracle error.
    #[must_use]
    pub const fn is_oracle(&self) -> bool {
        matches!(self, Self::Oracle(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if reading the user's input failed.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Result type alias for KnowLabel operations.
pub type KnowLabelResult<T> = Result<T, KnowLabelError>;
