//! Alias table configuration.

use super::defaults::{default_alias_path, default_true};
use serde::Deserialize;
use std::path::PathBuf;

/// Alias table configuration.
///
/// When disabled, names are sent to the card database verbatim and the
/// `alias` command is refused.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasConfig {
    /// Enable alias resolution and management (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// JSON document holding the table (default: "data/ygo-alias.json").
    /// Parent directories are created on first save.
    #[serde(default = "default_alias_path")]
    pub path: String,
}

impl AliasConfig {
    /// Document path as a [`PathBuf`].
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_alias_path(),
        }
    }
}
