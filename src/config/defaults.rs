//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Search Defaults
// =============================================================================

pub fn default_api_url() -> String {
    "https://ygocdb.com/api/v0/".to_string()
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_user_agent() -> String {
    concat!("ygocard/", env!("CARGO_PKG_VERSION")).to_string()
}

// =============================================================================
// Alias Defaults
// =============================================================================

pub fn default_alias_path() -> String {
    "data/ygo-alias.json".to_string()
}

// =============================================================================
// Limit Defaults
// =============================================================================

pub fn default_results() -> usize {
    5
}

pub fn default_max_results() -> usize {
    20
}
