//! Runtime configuration.
//!
//! Defaults match a stock local Ollama install. Every knob can be
//! overridden from the environment (`KNOWLABEL_*`) and, in the CLI, from
//! flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default generate endpoint of a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434/api/generate";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3.2";
/// Default model call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Default knowledge base location.
pub const DEFAULT_DATA_PATH: &str = "combined_ingredient_dataset_appended.csv";

/// Environment variable overriding the knowledge base path.
pub const ENV_DATA: &str = "KNOWLABEL_DATA";
/// Environment variable overriding the model endpoint.
pub const ENV_ENDPOINT: &str = "KNOWLABEL_OLLAMA_URL";
/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "KNOWLABEL_MODEL";
/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "KNOWLABEL_TIMEOUT_SECS";

/// Model oracle settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on a single model call.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowLabelConfig {
    /// CSV knowledge base path.
    pub data_path: PathBuf,
    /// Model oracle settings.
    pub oracle: OracleConfig,
}

impl Default for KnowLabelConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            oracle: OracleConfig::default(),
        }
    }
}

impl KnowLabelConfig {
    /// Defaults overlaid with `KNOWLABEL_*` environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for a malformed timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for a malformed timeout.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_DATA) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.oracle.endpoint = endpoint.trim().to_string();
        }
        if let Some(model) = get(ENV_MODEL) {
            config.oracle.model = model.trim().to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.oracle.timeout = parse_timeout_secs(ENV_TIMEOUT_SECS, &raw)?;
        }
        Ok(config)
    }
}

/// Parses a positive whole number of seconds.
///
/// # Errors
/// Returns `ConfigError::InvalidValue` when `raw` is not a positive integer.
pub fn parse_timeout_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let secs: u64 = raw.trim().parse().map_err(|_| invalid("expected whole seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KnowLabelConfig::default();
        assert_eq!(config.oracle.endpoint, "http://127.0.0.1:11434/api/generate");
        assert_eq!(config.oracle.model, "llama3.2");
        assert_eq!(config.oracle.timeout, Duration::from_secs(120));
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn test_env_overrides() {
        let config = KnowLabelConfig::from_lookup(lookup(&[
            (ENV_DATA, "/srv/ingredients.csv"),
            (ENV_ENDPOINT, "http://10.0.0.5:11434/api/generate"),
            (ENV_MODEL, " mistral "),
            (ENV_TIMEOUT_SECS, "300"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/ingredients.csv"));
        assert_eq!(config.oracle.endpoint, "http://10.0.0.5:11434/api/generate");
        assert_eq!(config.oracle.model, "mistral");
        assert_eq!(config.oracle.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = KnowLabelConfig::from_lookup(lookup(&[(ENV_MODEL, "  ")])).unwrap();
        assert_eq!(config.oracle.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = KnowLabelConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(format!("{err}").contains(ENV_TIMEOUT_SECS));

        assert!(parse_timeout_secs("t", "0").is_err());
        assert_eq!(parse_timeout_secs("t", " 5 ").unwrap(), Duration::from_secs(5));
    }
}
