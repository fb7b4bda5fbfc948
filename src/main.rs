//! ygocard - card search console.
//!
//! Reads one command per line from stdin and writes each reply to stdout.

use std::io::ErrorKind;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ygocard::config::ConfigError;
use ygocard::{AliasStore, Config, Dispatcher, YgoCdbClient};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing. Replies go to stdout, logs to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if std::env::var("YGOCARD_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }

    // Load configuration
    let explicit_path = std::env::args().nth(1);
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound && explicit_path.is_none() => {
            info!(path = %config_path, "Config file not found, using defaults");
            Config::default()
        }
        Err(e) => {
            error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    info!(
        api_url = %config.search.api_url,
        alias_enabled = config.alias.enabled,
        "Starting ygocard"
    );

    // Alias table: a bad document is logged and startup continues with an
    // empty table. Alias writes stay refused, so the file is not replaced,
    // until `alias reload` succeeds.
    let aliases = if config.alias.enabled {
        let store = AliasStore::new(config.alias.path_buf());
        if let Err(e) = store.load().await {
            warn!(path = %store.path().display(), error = %e, "Alias table unavailable, starting empty");
        }
        Some(Arc::new(store))
    } else {
        None
    };

    let lookup = Arc::new(YgoCdbClient::new(&config.search)?);
    let dispatcher = Dispatcher::new(&config, aliases, lookup);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let reply = dispatcher.handle_line("console", line).await;
                println!("{reply}");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
