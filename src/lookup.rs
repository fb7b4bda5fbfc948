//! Card database lookup.
//!
//! [`CardLookup`] is the seam between the query pipeline and the network.
//! [`YgoCdbClient`] is the production implementation; tests substitute
//! their own.

use crate::config::SearchConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use tracing::{debug, warn};
use ygo_proto::{Card, SearchResponse};

/// Something that can search the card database.
#[async_trait]
pub trait CardLookup: Send + Sync {
    /// Search for `term`. An empty vector means nothing matched.
    async fn search(&self, term: &str) -> Result<Vec<Card>, LookupError>;
}

/// HTTP client for the card database search API.
pub struct YgoCdbClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl YgoCdbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &SearchConfig) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl CardLookup for YgoCdbClient {
    async fn search(&self, term: &str) -> Result<Vec<Card>, LookupError> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("search", term)])
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| warn!(term = %term, status = ?e.status(), "Card search rejected"))?;

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;

        debug!(term = %term, results = parsed.result.len(), "Card search complete");
        Ok(parsed.result)
    }
}
