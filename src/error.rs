//! Unified error handling for ygocard.
//!
//! Each layer has its own enum: [`AliasError`] for the alias table,
//! [`LookupError`] for the card database collaborator and [`CommandError`]
//! for the command surface that wraps both. Command errors know how to
//! render themselves as a single chat reply; the underlying detail (paths,
//! transport errors) only ever reaches the log.

use thiserror::Error;

// ============================================================================
// Alias Errors (table mutation and persistence)
// ============================================================================

/// Alias table errors.
#[derive(Debug, Error)]
pub enum AliasError {
    #[error("alias document I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("alias document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("alias {alias} already belongs to {owner}")]
    Conflict { alias: String, owner: String },

    #[error("alias {alias} already exists for {canonical}")]
    Exists { canonical: String, alias: String },

    #[error("alias {alias} not found for {canonical}")]
    NotFound { canonical: String, alias: String },

    #[error("alias document has not been loaded, refusing to overwrite it")]
    NotLoaded,
}

impl AliasError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "alias_io",
            Self::Parse(_) => "alias_parse",
            Self::Conflict { .. } => "alias_conflict",
            Self::Exists { .. } => "alias_exists",
            Self::NotFound { .. } => "alias_not_found",
            Self::NotLoaded => "alias_not_loaded",
        }
    }

    /// True for precondition failures (the table was left untouched on purpose).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::Exists { .. } | Self::NotFound { .. } | Self::NotLoaded
        )
    }
}

// ============================================================================
// Lookup Errors (card database collaborator)
// ============================================================================

/// Card lookup errors.
///
/// Callers treat every variant as the same "lookup failed" condition; the
/// split exists for logging.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("card lookup transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("card lookup returned an unexpected body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "lookup_transport",
            Self::Decode(_) => "lookup_decode",
        }
    }
}

// ============================================================================
// Command Errors (user-facing surface)
// ============================================================================

/// Errors surfaced by the command dispatcher.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("alias support is disabled")]
    AliasDisabled,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("syntax error, usage: {usage}")]
    Syntax { usage: &'static str },

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error("card lookup for {name} failed: {source}")]
    Lookup {
        name: String,
        #[source]
        source: LookupError,
    },

    #[error("no card found for {name}")]
    NotFound { name: String },
}

impl CommandError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AliasDisabled => "alias_disabled",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Syntax { .. } => "syntax",
            Self::Alias(e) => e.error_code(),
            Self::Lookup { source, .. } => source.error_code(),
            Self::NotFound { .. } => "not_found",
        }
    }

    /// The reply shown to the user.
    ///
    /// Names the failure kind and the offending input; never includes file
    /// paths or raw error text.
    pub fn user_message(&self) -> String {
        match self {
            Self::AliasDisabled => "别名功能未启用。".to_string(),
            Self::UnknownCommand(cmd) => {
                format!("未知命令：{cmd}，发送 help 查看可用命令。")
            }
            Self::Syntax { usage } => format!("参数格式错误，用法：{usage}"),
            Self::Alias(AliasError::Io(_)) => "别名表读写失败，请稍后再试。".to_string(),
            Self::Alias(AliasError::Parse(_)) => {
                "别名表文件格式错误，已保留当前别名表。".to_string()
            }
            Self::Alias(AliasError::Conflict { alias, owner }) => {
                format!("别名「{alias}」已属于「{owner}」，请先删除后再添加。")
            }
            Self::Alias(AliasError::Exists { canonical, alias }) => {
                format!("「{canonical}」已存在别名「{alias}」。")
            }
            Self::Alias(AliasError::NotFound { canonical, alias }) => {
                format!("「{canonical}」没有别名「{alias}」。")
            }
            Self::Alias(AliasError::NotLoaded) => {
                "别名表文件未能加载，暂不允许修改；请修复文件后发送 alias reload。".to_string()
            }
            Self::Lookup { name, .. } => format!("查询卡片「{name}」时发生错误，请稍后再试。"),
            Self::NotFound { name } => format!("未找到卡片：{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_errors_keep_their_code_through_command_error() {
        let err: CommandError = AliasError::Conflict {
            alias: "a".into(),
            owner: "B".into(),
        }
        .into();
        assert_eq!(err.error_code(), "alias_conflict");
        assert_eq!(err.user_message(), "别名「a」已属于「B」，请先删除后再添加。");
    }

    #[test]
    fn io_details_never_reach_the_user() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let err = CommandError::Alias(AliasError::Io(io));
        assert!(!err.user_message().contains("/secret/path"));
        assert!(err.to_string().contains("/secret/path"));
    }

    #[test]
    fn not_found_names_the_input() {
        let err = CommandError::NotFound {
            name: "暗黑大法师".into(),
        };
        assert_eq!(err.user_message(), "未找到卡片：暗黑大法师");
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn precondition_classification() {
        assert!(
            AliasError::NotFound {
                canonical: "c".into(),
                alias: "a".into()
            }
            .is_precondition()
        );
        assert!(AliasError::NotLoaded.is_precondition());
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!AliasError::Parse(parse).is_precondition());
    }
}
