//! Rendering cards for chat replies.

use crate::card::Card;

/// Placeholder for optional names the card does not have.
pub const MISSING: &str = "-";

/// Render a card as reply lines.
///
/// # Examples
///
/// ```
/// use ygo_proto::{Card, CardText, format::card_lines};
///
/// let card = Card {
///     id: 89631139,
///     cn_name: "青眼白龙".to_string(),
///     md_name: Some("青眼白龙".to_string()),
///     jp_name: "青眼の白龍".to_string(),
///     en_name: "Blue-Eyes White Dragon".to_string(),
///     text: CardText {
///         types: "[怪兽|通常] 龙/光\n[★8] 3000/2500".to_string(),
///         pdesc: None,
///         desc: "以高攻击力著称的传说之龙。".to_string(),
///     },
/// };
///
/// let lines = card_lines(&card);
/// assert_eq!(lines[0], "卡片ID: 89631139");
/// assert_eq!(lines.last().unwrap(), "描述: 以高攻击力著称的传说之龙。");
/// ```
pub fn card_lines(card: &Card) -> Vec<String> {
    let mut lines = vec![
        format!("卡片ID: {}", card.id),
        format!(
            "中文卡名: {}  MD卡名: {}",
            card.cn_name,
            card.md_name.as_deref().unwrap_or(MISSING)
        ),
        format!("日文名: {}  英文名: {}", card.jp_name, card.en_name),
        format!("类型: {}", card.text.types),
    ];
    if let Some(pdesc) = &card.text.pdesc {
        lines.push(format!("灵摆效果: {pdesc}"));
    }
    lines.push(format!("描述: {}", card.text.desc));
    lines
}

/// Render a card as a single text block.
pub fn card_block(card: &Card) -> String {
    card_lines(card).join("\n")
}

/// One-line summary: `<cn_name> (<id>) <first line of types>`.
pub fn card_summary(card: &Card) -> String {
    let first = card.text.types.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        format!("{} ({})", card.cn_name, card.id)
    } else {
        format!("{} ({}) {}", card.cn_name, card.id, first)
    }
}
