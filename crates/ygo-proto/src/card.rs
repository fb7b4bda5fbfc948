//! Card records as returned by the card database search API.
//!
//! Decoding is strict about the fields the service renders: a record
//! missing `id`, any of the required names, or the `text` block fails to
//! decode instead of producing a half-empty card. Fields the service does
//! not use (`data`, ruby readings, alternate names) are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of a search response: `{"result": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Matching cards, in the order the database ranked them.
    pub result: Vec<Card>,
}

/// A single card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Card {
    /// Card password (numeric id).
    pub id: u64,
    /// Simplified Chinese name.
    pub cn_name: String,
    /// Master Duel client name. Absent for cards not in that client.
    #[serde(default, deserialize_with = "non_empty")]
    pub md_name: Option<String>,
    /// Japanese name.
    pub jp_name: String,
    /// English name.
    pub en_name: String,
    /// Type line and effect text.
    pub text: CardText,
}

/// Textual part of a card record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardText {
    /// Type descriptor: category, race/attribute, level, ATK/DEF, scales.
    pub types: String,
    /// Pendulum effect, if the card has one.
    #[serde(default, deserialize_with = "non_empty")]
    pub pdesc: Option<String>,
    /// Card effect or flavour text.
    pub desc: String,
}

impl Card {
    /// Lower-cased type string, the haystack for filter matching.
    pub fn type_haystack(&self) -> String {
        self.text.types.to_lowercase()
    }

    /// True if the card carries pendulum effect text.
    #[inline]
    pub fn is_pendulum(&self) -> bool {
        self.text.pdesc.is_some()
    }
}

/// Treat `""` and `null` the same as a missing field.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
