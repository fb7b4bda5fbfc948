//! Fake card database.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use ygo_proto::{Card, CardText};
use ygocard::{CardLookup, LookupError};

/// Answers searches from a fixed map and records every term it receives.
#[derive(Default)]
pub struct FakeLookup {
    cards: HashMap<String, Vec<Card>>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every search fails with a decode error.
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Register the result list for `term`.
    pub fn with(mut self, term: &str, cards: Vec<Card>) -> Self {
        self.cards.insert(term.to_string(), cards);
        self
    }

    /// Terms searched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CardLookup for FakeLookup {
    async fn search(&self, term: &str) -> Result<Vec<Card>, LookupError> {
        self.calls.lock().push(term.to_string());
        if self.fail {
            let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
            return Err(LookupError::Decode(err));
        }
        Ok(self.cards.get(term).cloned().unwrap_or_default())
    }
}

/// Build a card with the given id, Chinese name and type string.
pub fn card(id: u64, cn_name: &str, types: &str) -> Card {
    Card {
        id,
        cn_name: cn_name.to_string(),
        md_name: Some(cn_name.to_string()),
        jp_name: format!("{cn_name}(jp)"),
        en_name: format!("{cn_name}(en)"),
        text: CardText {
            types: types.to_string(),
            pdesc: None,
            desc: format!("{cn_name}的效果"),
        },
    }
}
