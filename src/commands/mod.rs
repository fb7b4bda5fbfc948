//! Command surface.
//!
//! Text in, text out. A line is parsed into a [`Command`] and handed to
//! [`Dispatcher::dispatch`]; every failure becomes a one-line reply via
//! [`CommandError::user_message`].
//!
//! | Command                                   | Words                 |
//! |-------------------------------------------|-----------------------|
//! | `<name...> [-t <expr...>]`                | `ck`, `查卡`, `card`   |
//! | `<name...> [-n <N>] [-t <expr...>]`       | `cks`, `查卡多`, `cards` |
//! | `add\|delete <canonical> <alias>`, `reload`, `list [canonical]` | `alias`, `别名` |
//! | (none)                                    | `help`, `帮助`         |

pub mod alias;
pub mod query;

use crate::alias::AliasStore;
use crate::config::{Config, LimitsConfig};
use crate::error::CommandError;
use crate::lookup::CardLookup;
use crate::resolver::QueryResolver;
use crate::telemetry::{CommandTimer, spans};
use std::sync::Arc;
use tracing::{Instrument, debug, warn};

pub const CARD_USAGE: &str = "ck <卡名> [-t <类型过滤>]";
pub const CARDS_USAGE: &str = "cks <卡名> [-n <数量>] [-t <类型过滤>]";
pub const ALIAS_USAGE: &str =
    "alias add <标准名> <别名> | alias delete <标准名> <别名> | alias reload | alias list [标准名]";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// First matching card.
    Card { name: String, filter: String },
    /// Up to `count` matching cards.
    Cards {
        name: String,
        count: Option<usize>,
        filter: String,
    },
    /// Alias table management.
    Alias(AliasAction),
    /// Usage text.
    Help,
}

/// Alias table actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasAction {
    Add { canonical: String, alias: String },
    Delete { canonical: String, alias: String },
    Reload,
    List { canonical: Option<String> },
}

impl Command {
    /// Static name for logs and spans.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Card { .. } => "card",
            Command::Cards { .. } => "cards",
            Command::Alias(AliasAction::Add { .. }) => "alias.add",
            Command::Alias(AliasAction::Delete { .. }) => "alias.delete",
            Command::Alias(AliasAction::Reload) => "alias.reload",
            Command::Alias(AliasAction::List { .. }) => "alias.list",
            Command::Help => "help",
        }
    }

    /// Parse one line of input.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let Some((word, args)) = parts.split_first() else {
            return Ok(Command::Help);
        };

        match word.to_lowercase().as_str() {
            "ck" | "查卡" | "card" => {
                let opts = QueryArgs::parse(args, false).ok_or(CommandError::Syntax {
                    usage: CARD_USAGE,
                })?;
                Ok(Command::Card {
                    name: opts.name,
                    filter: opts.filter,
                })
            }
            "cks" | "查卡多" | "cards" => {
                let opts = QueryArgs::parse(args, true).ok_or(CommandError::Syntax {
                    usage: CARDS_USAGE,
                })?;
                Ok(Command::Cards {
                    name: opts.name,
                    count: opts.count,
                    filter: opts.filter,
                })
            }
            "alias" | "别名" => AliasAction::parse(args)
                .map(Command::Alias)
                .ok_or(CommandError::Syntax { usage: ALIAS_USAGE }),
            "help" | "帮助" => Ok(Command::Help),
            _ => Err(CommandError::UnknownCommand(word.to_string())),
        }
    }
}

impl AliasAction {
    fn parse(args: &[&str]) -> Option<Self> {
        let (action, rest) = args.split_first()?;
        match (action.to_lowercase().as_str(), rest) {
            ("add" | "添加", [canonical, alias]) => Some(AliasAction::Add {
                canonical: canonical.to_string(),
                alias: alias.to_string(),
            }),
            ("delete" | "del" | "rm" | "删除", [canonical, alias]) => Some(AliasAction::Delete {
                canonical: canonical.to_string(),
                alias: alias.to_string(),
            }),
            ("reload" | "重载", []) => Some(AliasAction::Reload),
            ("list" | "ls" | "列表", []) => Some(AliasAction::List { canonical: None }),
            ("list" | "ls" | "列表", [canonical]) => Some(AliasAction::List {
                canonical: Some(canonical.to_string()),
            }),
            _ => None,
        }
    }
}

/// Name and options of a card query.
struct QueryArgs {
    name: String,
    count: Option<usize>,
    filter: String,
}

impl QueryArgs {
    /// `-t`/`--type` takes the rest of the line. `-n`/`--count` takes one
    /// positive integer and is only accepted when `allow_count` is set.
    fn parse(args: &[&str], allow_count: bool) -> Option<Self> {
        let mut name = Vec::new();
        let mut count = None;
        let mut filter = String::new();

        let mut iter = args.iter().enumerate();
        while let Some((i, arg)) = iter.next() {
            match *arg {
                "-t" | "--type" => {
                    let rest = &args[i + 1..];
                    if rest.is_empty() {
                        return None;
                    }
                    filter = rest.join(" ");
                    break;
                }
                "-n" | "--count" if allow_count => {
                    let (_, value) = iter.next()?;
                    let n: usize = value.parse().ok()?;
                    if n == 0 {
                        return None;
                    }
                    count = Some(n);
                }
                word => name.push(word),
            }
        }

        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.join(" "),
            count,
            filter,
        })
    }
}

/// Routes parsed commands to their handlers.
pub struct Dispatcher {
    resolver: QueryResolver,
    aliases: Option<Arc<AliasStore>>,
    limits: LimitsConfig,
}

impl Dispatcher {
    /// `aliases` must be `Some` exactly when `config.alias.enabled` is set.
    pub fn new(
        config: &Config,
        aliases: Option<Arc<AliasStore>>,
        lookup: Arc<dyn CardLookup>,
    ) -> Self {
        Self {
            resolver: QueryResolver::new(aliases.clone(), lookup),
            aliases,
            limits: config.limits.clone(),
        }
    }

    /// Parse and dispatch one line, always producing a reply.
    pub async fn handle_line(&self, invoker: &str, text: &str) -> String {
        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(e) => {
                debug!(invoker = %invoker, code = e.error_code(), "Command rejected");
                return e.user_message();
            }
        };

        let name = command.name();
        async {
            let _timer = CommandTimer::new(name);
            match self.dispatch(command).await {
                Ok(reply) => reply,
                Err(e) => {
                    match &e {
                        CommandError::Alias(inner) if !inner.is_precondition() => {
                            warn!(code = e.error_code(), error = %e, "Command failed");
                        }
                        CommandError::Lookup { .. } => {
                            warn!(code = e.error_code(), error = %e, "Command failed");
                        }
                        _ => debug!(code = e.error_code(), error = %e, "Command failed"),
                    }
                    e.user_message()
                }
            }
        }
        .instrument(spans::command(name, invoker))
        .await
    }

    /// Run a parsed command.
    pub async fn dispatch(&self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::Card { name, filter } => {
                query::handle_card(&self.resolver, &name, &filter).await
            }
            Command::Cards {
                name,
                count,
                filter,
            } => {
                let limit = self.limits.effective(count);
                query::handle_cards(&self.resolver, &name, &filter, limit).await
            }
            Command::Alias(action) => {
                let store = self.aliases.as_deref().ok_or(CommandError::AliasDisabled)?;
                alias::handle_alias(store, action).await
            }
            Command::Help => Ok(help_text()),
        }
    }
}

/// Usage text for `help`.
pub fn help_text() -> String {
    [
        "可用命令：",
        CARD_USAGE,
        CARDS_USAGE,
        ALIAS_USAGE,
        "类型过滤：atk:<攻击力> def:<守备力> p:<灵摆刻度> 或任意关键字，多个条件同时满足。",
    ]
    .join("\n")
}
