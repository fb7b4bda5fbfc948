//! Integration test common infrastructure.
//!
//! Provides an in-process bot wired to a fake card database and a
//! temporary alias document.

pub mod lookup;

#[allow(unused_imports)]
pub use lookup::{FakeLookup, card};

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use ygocard::{AliasStore, Config, Dispatcher};

/// A dispatcher plus the fixtures it talks to.
pub struct TestBot {
    pub dispatcher: Dispatcher,
    pub lookup: Arc<FakeLookup>,
    pub aliases: Option<Arc<AliasStore>>,
    _dir: TempDir,
}

impl TestBot {
    /// Start a bot with alias support and the given initial alias document.
    pub async fn with_aliases(document: Option<&str>, lookup: FakeLookup) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data/ygo-alias.json");
        if let Some(document) = document {
            std::fs::create_dir_all(path.parent().unwrap())?;
            std::fs::write(&path, document)?;
        }

        let store = Arc::new(AliasStore::open(&path).await?);
        let lookup = Arc::new(lookup);
        let config = Config::default();
        let dispatcher = Dispatcher::new(&config, Some(Arc::clone(&store)), lookup.clone());

        Ok(Self {
            dispatcher,
            lookup,
            aliases: Some(store),
            _dir: dir,
        })
    }

    /// Start a bot with alias support disabled.
    #[allow(dead_code)]
    pub fn without_aliases(lookup: FakeLookup) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let mut config = Config::default();
        config.alias.enabled = false;
        let lookup = Arc::new(lookup);
        let dispatcher = Dispatcher::new(&config, None, lookup.clone());

        Ok(Self {
            dispatcher,
            lookup,
            aliases: None,
            _dir: dir,
        })
    }

    /// Send one line and return the reply.
    pub async fn send(&self, line: &str) -> String {
        self.dispatcher.handle_line("tester", line).await
    }

    /// Path of the alias document.
    #[allow(dead_code)]
    pub fn alias_path(&self) -> PathBuf {
        self.aliases
            .as_ref()
            .map(|s| s.path().to_path_buf())
            .expect("alias support disabled")
    }
}
