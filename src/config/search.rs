//! Card database endpoint configuration.

use super::defaults::{default_api_url, default_timeout_secs, default_user_agent};
use serde::Deserialize;
use std::time::Duration;

/// Card database search API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint; the term is sent as the `search` query parameter.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whole-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl SearchConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
