//! Query pipeline: alias resolution, lookup, type filtering.

use crate::alias::AliasStore;
use crate::error::LookupError;
use crate::lookup::CardLookup;
use crate::telemetry::spans;
use std::sync::Arc;
use tracing::{Instrument, debug};
use ygo_proto::{Card, FilterExpression};

/// Cards that survived filtering, plus the term that was actually searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Search term after alias resolution.
    pub term: String,
    /// Matching cards in lookup order.
    pub cards: Vec<Card>,
}

/// Composes alias resolution, card lookup and type filtering.
///
/// An empty result is not an error at this layer. Truncation is left to
/// the caller.
pub struct QueryResolver {
    aliases: Option<Arc<AliasStore>>,
    lookup: Arc<dyn CardLookup>,
}

impl QueryResolver {
    /// `aliases` is `None` when alias support is disabled.
    pub fn new(aliases: Option<Arc<AliasStore>>, lookup: Arc<dyn CardLookup>) -> Self {
        Self { aliases, lookup }
    }

    /// Resolve `raw_name`, look it up once, and keep cards matching `filter`.
    pub async fn query(&self, raw_name: &str, filter: &str) -> Result<QueryOutcome, LookupError> {
        let term = self.resolve(raw_name);
        let expr = FilterExpression::parse(filter);

        let found = self
            .lookup
            .search(&term)
            .instrument(spans::lookup(&term))
            .await?;
        let total = found.len();
        let cards = expr.apply(found);

        debug!(
            raw = %raw_name,
            term = %term,
            filter = %expr,
            found = total,
            kept = cards.len(),
            "Query resolved"
        );
        Ok(QueryOutcome { term, cards })
    }

    /// Alias resolution only; passthrough when aliases are disabled.
    pub fn resolve(&self, raw_name: &str) -> String {
        match &self.aliases {
            Some(store) => store.resolve(raw_name),
            None => raw_name.to_string(),
        }
    }
}
