//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level [`Config`] and loading
//! - [`search`]: Card database endpoint (SearchConfig)
//! - [`alias`]: Alias table feature switch and document path (AliasConfig)
//! - [`limits`]: Result count limits for multi-card queries (LimitsConfig)
//! - [`validation`]: Startup sanity checks

mod alias;
mod defaults;
mod limits;
mod search;
mod types;
mod validation;

pub use alias::AliasConfig;
pub use limits::LimitsConfig;
pub use search::SearchConfig;
pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};
