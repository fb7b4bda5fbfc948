//! Card query handlers.

use crate::error::CommandError;
use crate::resolver::QueryResolver;
use tracing::{debug, info};
use ygo_proto::format::{card_block, card_summary};

/// Handle a single-card query: the first card that passes the filter.
pub async fn handle_card(
    resolver: &QueryResolver,
    name: &str,
    filter: &str,
) -> Result<String, CommandError> {
    let outcome = resolver
        .query(name, filter)
        .await
        .map_err(|source| CommandError::Lookup {
            name: name.to_string(),
            source,
        })?;

    let card = outcome.cards.first().ok_or_else(|| CommandError::NotFound {
        name: name.to_string(),
    })?;

    info!(name = %name, term = %outcome.term, card = %card_summary(card), "Card found");
    Ok(card_block(card))
}

/// Handle a multi-card query, showing at most `limit` cards.
pub async fn handle_cards(
    resolver: &QueryResolver,
    name: &str,
    filter: &str,
    limit: usize,
) -> Result<String, CommandError> {
    let outcome = resolver
        .query(name, filter)
        .await
        .map_err(|source| CommandError::Lookup {
            name: name.to_string(),
            source,
        })?;

    let total = outcome.cards.len();
    if total == 0 {
        return Err(CommandError::NotFound {
            name: name.to_string(),
        });
    }

    let shown = total.min(limit);
    info!(name = %name, term = %outcome.term, total, shown, "Cards found");
    for card in outcome.cards.iter().skip(shown) {
        debug!(card = %card_summary(card), "Card omitted");
    }

    let mut blocks = Vec::with_capacity(shown + 1);
    if shown < total {
        blocks.push(format!("找到 {total} 张卡片，显示前 {shown} 张："));
    }
    blocks.extend(outcome.cards.iter().take(shown).map(card_block));
    Ok(blocks.join("\n\n"))
}
