//! Result count limits.

use super::defaults::{default_max_results, default_results};
use serde::Deserialize;

/// Result count limits for multi-card queries.
///
/// These limits keep a broad search term from flooding the chat.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Cards shown by `cards` when no count is given (default: 5).
    #[serde(default = "default_results")]
    pub default_results: usize,
    /// Hard cap on cards shown by `cards` (default: 20).
    /// Larger requested counts are clamped, not rejected.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl LimitsConfig {
    /// Effective count for a request: the default when absent, clamped to the cap.
    pub fn effective(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_results)
            .min(self.max_results)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_results: default_results(),
            max_results: default_max_results(),
        }
    }
}
