//! ygocard - Yu-Gi-Oh! card search service.
//!
//! Resolves user-supplied names through a persistent alias table, searches
//! the card database, filters results with the type-filter language from
//! [`ygo_proto::filter`] and renders replies.

pub mod alias;
pub mod commands;
pub mod config;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod telemetry;

pub use alias::{AliasStore, AliasTable};
pub use commands::{AliasAction, Command, Dispatcher};
pub use config::Config;
pub use error::{AliasError, CommandError, LookupError};
pub use lookup::{CardLookup, YgoCdbClient};
pub use resolver::{QueryOutcome, QueryResolver};
