//! ALIAS command handler.

use super::AliasAction;
use crate::alias::AliasStore;
use crate::error::CommandError;

/// Handle an alias table action.
pub async fn handle_alias(store: &AliasStore, action: AliasAction) -> Result<String, CommandError> {
    match action {
        AliasAction::Add { canonical, alias } => {
            store.add_alias(&canonical, &alias).await?;
            Ok(format!("已添加别名：「{alias}」→「{canonical}」"))
        }
        AliasAction::Delete { canonical, alias } => {
            store.remove_alias(&canonical, &alias).await?;
            Ok(format!("已删除别名：「{alias}」→「{canonical}」"))
        }
        AliasAction::Reload => {
            store.load().await?;
            let table = store.snapshot();
            Ok(format!(
                "别名表已重新加载：{} 个标准名，{} 个别名。",
                table.len(),
                table.alias_count()
            ))
        }
        AliasAction::List { canonical: None } => {
            let table = store.snapshot();
            if table.is_empty() {
                return Ok("别名表为空。".to_string());
            }
            Ok(table
                .iter()
                .map(|(canonical, aliases)| format!("{canonical}：{}", aliases.join("、")))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        AliasAction::List {
            canonical: Some(canonical),
        } => {
            let table = store.snapshot();
            Ok(match table.aliases(&canonical) {
                Some(aliases) => format!("「{canonical}」的别名：{}", aliases.join("、")),
                None => format!("「{canonical}」没有别名。"),
            })
        }
    }
}
