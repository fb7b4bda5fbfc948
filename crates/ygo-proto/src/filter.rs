//! Type-filter predicate language.
//!
//! A filter expression is a whitespace-separated list of clauses, all of
//! which must match (logical AND) for a card to pass:
//!
//! | Clause      | Matches when the lower-cased type string contains |
//! |-------------|---------------------------------------------------|
//! | `atk:<N>`   | `atk<N>`                                          |
//! | `def:<N>`   | `def<N>`                                          |
//! | `p:<N>`     | `/<N>/` (pendulum scale)                          |
//! | anything    | the token itself                                  |
//!
//! `<N>` must be a run of ASCII digits. Anything else after a key (a sign,
//! letters, nothing at all) turns the clause into a plain substring search
//! for the whole token, so a typo narrows the result set instead of
//! failing the query.
//!
//! # Examples
//!
//! ```
//! use ygo_proto::filter::{Clause, FilterExpression};
//!
//! let expr = FilterExpression::parse("ATK:2500  Machine");
//! assert_eq!(
//!     expr.clauses(),
//!     &[Clause::Atk(2500), Clause::Contains("machine".to_string())]
//! );
//! assert!(expr.matches_types("[机械族/效果] ATK2500/DEF2000 machine"));
//!
//! // Malformed numbers degrade to substring search.
//! assert_eq!(
//!     FilterExpression::parse("def:abc").clauses(),
//!     &[Clause::Contains("def:abc".to_string())]
//! );
//! ```

use crate::card::Card;
use std::fmt;

/// One unit of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clause {
    /// `atk:<N>`
    Atk(u64),
    /// `def:<N>`
    Def(u64),
    /// `p:<N>`, pendulum scale.
    Scale(u64),
    /// Plain lower-cased substring.
    Contains(String),
}

impl Clause {
    /// Parse a single token. The token is lower-cased first.
    pub fn parse(token: &str) -> Self {
        let token = token.to_lowercase();

        if let Some((key, value)) = token.split_once(':') {
            if let Some(n) = parse_decimal(value) {
                match key {
                    "atk" => return Clause::Atk(n),
                    "def" => return Clause::Def(n),
                    "p" => return Clause::Scale(n),
                    _ => {}
                }
            }
        }

        Clause::Contains(token)
    }

    /// The substring this clause looks for in the type string.
    pub fn needle(&self) -> String {
        match self {
            Clause::Atk(n) => format!("atk{n}"),
            Clause::Def(n) => format!("def{n}"),
            Clause::Scale(n) => format!("/{n}/"),
            Clause::Contains(s) => s.clone(),
        }
    }

    /// Test this clause against an already lower-cased type string.
    #[inline]
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Clause::Contains(s) => haystack.contains(s.as_str()),
            keyed => haystack.contains(&keyed.needle()),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Atk(n) => write!(f, "atk:{n}"),
            Clause::Def(n) => write!(f, "def:{n}"),
            Clause::Scale(n) => write!(f, "p:{n}"),
            Clause::Contains(s) => f.write_str(s),
        }
    }
}

/// Digits only: no sign, no whitespace, not empty, fits in a `u64`.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// An ordered conjunction of [`Clause`]s.
///
/// The empty expression matches every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    clauses: Vec<Clause>,
}

impl FilterExpression {
    /// Parse an expression. Never fails.
    pub fn parse(expression: &str) -> Self {
        Self {
            clauses: expression.split_whitespace().map(Clause::parse).collect(),
        }
    }

    /// Parsed clauses, in input order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Test a card's type string.
    pub fn matches(&self, card: &Card) -> bool {
        if self.is_empty() {
            return true;
        }
        self.matches_haystack(&card.type_haystack())
    }

    /// Test a raw type string. Case-insensitive.
    pub fn matches_types(&self, types: &str) -> bool {
        self.matches_haystack(&types.to_lowercase())
    }

    fn matches_haystack(&self, haystack: &str) -> bool {
        self.clauses.iter().all(|c| c.matches(haystack))
    }

    /// Keep the cards that match, preserving their relative order.
    pub fn apply(&self, cards: impl IntoIterator<Item = Card>) -> Vec<Card> {
        cards.into_iter().filter(|c| self.matches(c)).collect()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
