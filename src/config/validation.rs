//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("search.api_url is required")]
    MissingApiUrl,
    #[error("search.api_url must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),
    #[error("search.timeout_secs must be greater than 0")]
    ZeroTimeout,
    #[error("alias.path is required when alias.enabled = true")]
    MissingAliasPath,
    #[error("limits.default_results must be greater than 0")]
    ZeroDefaultResults,
    #[error("limits.max_results must be greater than 0")]
    ZeroMaxResults,
    #[error("limits.default_results ({0}) exceeds limits.max_results ({1})")]
    DefaultExceedsMax(usize, usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Search endpoint
    let url = config.search.api_url.trim();
    if url.is_empty() {
        errors.push(ValidationError::MissingApiUrl);
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ValidationError::InvalidApiUrl(url.to_string()));
    }
    if config.search.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    // Alias document
    if config.alias.enabled && config.alias.path.trim().is_empty() {
        errors.push(ValidationError::MissingAliasPath);
    }

    // Limits
    let limits = &config.limits;
    if limits.default_results == 0 {
        errors.push(ValidationError::ZeroDefaultResults);
    }
    if limits.max_results == 0 {
        errors.push(ValidationError::ZeroMaxResults);
    }
    if limits.default_results > limits.max_results && limits.max_results > 0 {
        errors.push(ValidationError::DefaultExceedsMax(
            limits.default_results,
            limits.max_results,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
