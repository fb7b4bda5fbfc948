//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::alias::AliasConfig;
use super::limits::LimitsConfig;
use super::search::SearchConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(
        "invalid config: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Invalid(Vec<ValidationError>),
}

/// Service configuration.
///
/// Every section is optional; an empty file yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Card database endpoint.
    #[serde(default)]
    pub search: SearchConfig,
    /// Alias table.
    #[serde(default)]
    pub alias: AliasConfig,
    /// Result count limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_valid() {
        let config: Config = "".parse().unwrap();
        assert!(config.alias.enabled);
        assert_eq!(config.limits.default_results, 5);
    }

    #[test]
    fn full_file() {
        let config: Config = r#"
[search]
api_url = "https://example.test/api/"
timeout_secs = 5
user_agent = "test-agent"

[alias]
enabled = false
path = "/tmp/aliases.json"

[limits]
default_results = 2
max_results = 4
"#
        .parse()
        .unwrap();
        assert_eq!(config.search.api_url, "https://example.test/api/");
        assert_eq!(config.search.user_agent, "test-agent");
        assert!(!config.alias.enabled);
        assert_eq!(config.alias.path, "/tmp/aliases.json");
        assert_eq!(config.limits.max_results, 4);
    }

    #[test]
    fn example_config_matches_defaults() {
        let config: Config = include_str!("../../config.example.toml").parse().unwrap();
        let defaults = Config::default();
        assert_eq!(config.search.api_url, defaults.search.api_url);
        assert_eq!(config.alias.path, defaults.alias.path);
        assert_eq!(config.limits.max_results, defaults.limits.max_results);
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = "[search\napi_url = 1".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_reported_together() {
        let err = r#"
[search]
timeout_secs = 0

[limits]
default_results = 0
"#
        .parse::<Config>()
        .unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/ygocard.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
