//! # ygo-proto
//!
//! I/O-free building blocks for the ygocard service:
//!
//! - [`Card`]: the strict record returned by the card database search API
//! - [`filter`]: the compact type-filter predicate language
//!   (`atk:<N>`, `def:<N>`, `p:<N>` and plain substring tokens)
//! - [`format`]: rendering a card into display lines
//!
//! ## Quick Start
//!
//! ```rust
//! use ygo_proto::{Card, CardText, FilterExpression};
//!
//! let card = Card {
//!     id: 46986414,
//!     cn_name: "黑魔术师".to_string(),
//!     md_name: None,
//!     jp_name: "ブラック・マジシャン".to_string(),
//!     en_name: "Dark Magician".to_string(),
//!     text: CardText {
//!         types: "[怪兽|通常] 魔法师/暗 ATK2500/DEF2100".to_string(),
//!         pdesc: None,
//!         desc: "魔法师的最高峰。".to_string(),
//!     },
//! };
//!
//! let expr = FilterExpression::parse("atk:2500 魔法师");
//! assert!(expr.matches(&card));
//! assert!(!FilterExpression::parse("def:2000").matches(&card));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod card;
pub mod filter;
pub mod format;

pub use card::{Card, CardText, SearchResponse};
pub use filter::{Clause, FilterExpression};
