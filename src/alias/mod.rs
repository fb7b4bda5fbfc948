//! File-backed alias table.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      AliasStore                      │
//! ├──────────────────────────────────────────────────────┤
//! │  write_lock (tokio Mutex)   snapshot (RwLock<Arc<_>>)│
//! │        │                          ▲                  │
//! │        ▼                          │ swap on success  │
//! │  clone ─► mutate ─► save to disk ─┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations run one at a time: the write lock is held across the
//! precondition check, the durable write and the swap. Readers clone the
//! current `Arc` and never wait on disk I/O. A failed write leaves both the
//! snapshot and the document as they were.
//!
//! Writes are refused until a `load` succeeds. A document that failed to
//! load (for example a hand edit with a syntax error) is never replaced by
//! whatever table happens to be in memory.

mod persistence;
mod table;

pub use table::{AliasDocument, AliasTable};

use crate::error::AliasError;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Canonical name <-> alias mapping persisted as a JSON document.
#[derive(Debug)]
pub struct AliasStore {
    /// Backing document.
    path: PathBuf,
    /// Current table. Replaced wholesale, never mutated in place.
    snapshot: RwLock<Arc<AliasTable>>,
    /// Serialises load/save/mutations. Guards whether the document is
    /// currently loaded, i.e. whether the table may be written back.
    write_lock: Mutex<bool>,
}

impl AliasStore {
    /// Create a store with an empty table. Nothing is read or written, and
    /// mutations fail with [`AliasError::NotLoaded`] until [`load`](Self::load)
    /// succeeds.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            snapshot: RwLock::new(Arc::new(AliasTable::new())),
            write_lock: Mutex::new(false),
        }
    }

    /// Create a store and load its document.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, AliasError> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    /// Backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current table.
    pub fn snapshot(&self) -> Arc<AliasTable> {
        Arc::clone(&self.snapshot.read())
    }

    /// (Re)load the document.
    ///
    /// A missing document initialises an empty table and writes it out. A
    /// malformed document fails with [`AliasError::Parse`] and the current
    /// table is kept for resolution, but writes are refused until the
    /// document loads cleanly.
    pub async fn load(&self) -> Result<(), AliasError> {
        let mut loaded = self.write_lock.lock().await;
        *loaded = false;

        let table = match persistence::load(&self.path).await {
            Ok(Some(table)) => table,
            Ok(None) => {
                info!(path = %self.path.display(), "Alias document not found, creating empty table");
                let table = AliasTable::new();
                persistence::save(&table, &self.path).await?;
                table
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load alias document, keeping current table");
                return Err(e);
            }
        };

        info!(
            path = %self.path.display(),
            entries = table.len(),
            aliases = table.alias_count(),
            "Alias table loaded"
        );
        *self.snapshot.write() = Arc::new(table);
        *loaded = true;
        Ok(())
    }

    /// True once the document has been loaded and may be written back.
    pub async fn is_loaded(&self) -> bool {
        *self.write_lock.lock().await
    }

    /// Write the current table to the document.
    pub async fn save(&self) -> Result<(), AliasError> {
        let loaded = self.write_lock.lock().await;
        if !*loaded {
            return Err(AliasError::NotLoaded);
        }
        let table = self.snapshot();
        persistence::save(&table, &self.path).await
    }

    /// Canonical name owning `name` as an alias, or `name` unchanged.
    pub fn resolve(&self, name: &str) -> String {
        self.snapshot.read().resolve(name).to_string()
    }

    /// Add `alias` to `canonical` and persist.
    pub async fn add_alias(&self, canonical: &str, alias: &str) -> Result<(), AliasError> {
        self.mutate(|table| table.insert(canonical, alias)).await?;
        info!(canonical = %canonical, alias = %alias, "Alias added");
        Ok(())
    }

    /// Remove `alias` from `canonical` and persist. Empty entries are pruned.
    pub async fn remove_alias(&self, canonical: &str, alias: &str) -> Result<(), AliasError> {
        self.mutate(|table| table.remove(canonical, alias)).await?;
        info!(canonical = %canonical, alias = %alias, "Alias removed");
        Ok(())
    }

    /// Copy-on-write mutation: apply `f` to a clone, persist, then publish.
    async fn mutate<F>(&self, f: F) -> Result<(), AliasError>
    where
        F: FnOnce(&mut AliasTable) -> Result<(), AliasError>,
    {
        let loaded = self.write_lock.lock().await;
        if !*loaded {
            return Err(AliasError::NotLoaded);
        }

        let mut next = (*self.snapshot()).clone();
        f(&mut next)?;
        persistence::save(&next, &self.path).await?;

        *self.snapshot.write() = Arc::new(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store_with(body: Option<&str>) -> (AliasStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ygo-alias.json");
        if let Some(body) = body {
            std::fs::write(&path, body).unwrap();
        }
        let store = AliasStore::open(&path).await.unwrap();
        (store, dir)
    }

    fn on_disk(store: &AliasStore) -> AliasDocument {
        serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn first_run_creates_empty_document() {
        let (store, _dir) = store_with(None).await;
        assert!(store.snapshot().is_empty());
        assert!(store.path().exists());
        assert!(on_disk(&store).is_empty());
    }

    #[tokio::test]
    async fn resolve_loaded_aliases() {
        let (store, _dir) = store_with(Some(r#"{"艾克佐迪亚": ["暗黑大法师"]}"#)).await;
        assert_eq!(store.resolve("暗黑大法师"), "艾克佐迪亚");
        assert_eq!(store.resolve("青眼白龙"), "青眼白龙");
    }

    #[tokio::test]
    async fn mutations_are_persisted_immediately() {
        let (store, _dir) = store_with(None).await;

        store.add_alias("艾克佐迪亚", "暗黑大法师").await.unwrap();
        assert_eq!(on_disk(&store).get("艾克佐迪亚").unwrap(), &vec!["暗黑大法师".to_string()]);

        store.remove_alias("艾克佐迪亚", "暗黑大法师").await.unwrap();
        assert!(on_disk(&store).is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn conflict_leaves_memory_and_disk_unchanged() {
        let (store, _dir) = store_with(None).await;
        store.add_alias("C", "a").await.unwrap();
        let before_mem = store.snapshot();
        let before_disk = on_disk(&store);

        let err = store.add_alias("C2", "a").await.unwrap_err();
        assert!(matches!(err, AliasError::Conflict { .. }));
        assert_eq!(*store.snapshot(), *before_mem);
        assert_eq!(on_disk(&store), before_disk);
    }

    #[tokio::test]
    async fn remove_unknown_pair() {
        let (store, _dir) = store_with(Some(r#"{"艾克佐迪亚": ["暗黑大法师"]}"#)).await;
        let before = store.snapshot();

        let err = store
            .remove_alias("艾克佐迪亚", "不存在的别名")
            .await
            .unwrap_err();
        assert!(matches!(err, AliasError::NotFound { .. }));
        assert_eq!(*store.snapshot(), *before);
    }

    #[tokio::test]
    async fn malformed_reload_keeps_previous_table() {
        let (store, _dir) = store_with(Some(r#"{"A": ["a"]}"#)).await;
        std::fs::write(store.path(), "{ broken").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, AliasError::Parse(_)));
        assert_eq!(store.resolve("a"), "A");

        // The previous table must not be written over the edited file.
        let err = store.add_alias("C", "c").await.unwrap_err();
        assert!(matches!(err, AliasError::NotLoaded));
        assert!(matches!(store.save().await, Err(AliasError::NotLoaded)));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ broken");
    }

    #[tokio::test]
    async fn malformed_startup_document_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ygo-alias.json");
        let body = r#"{"艾克佐迪亚": ["暗黑大法师"], "青眼白龙": ["白龙"],}"#;
        std::fs::write(&path, body).unwrap();

        let store = AliasStore::new(&path);
        assert!(matches!(store.load().await, Err(AliasError::Parse(_))));
        assert!(!store.is_loaded().await);

        let err = store.add_alias("黑魔术师", "黑魔").await.unwrap_err();
        assert!(matches!(err, AliasError::NotLoaded));
        let err = store.remove_alias("艾克佐迪亚", "暗黑大法师").await.unwrap_err();
        assert!(matches!(err, AliasError::NotLoaded));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
        assert_eq!(store.resolve("黑魔"), "黑魔");

        // Once the file is fixed, reload unblocks writes and keeps the edits.
        std::fs::write(&path, r#"{"艾克佐迪亚": ["暗黑大法师"], "青眼白龙": ["白龙"]}"#).unwrap();
        store.load().await.unwrap();
        store.add_alias("黑魔术师", "黑魔").await.unwrap();
        let doc = on_disk(&store);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc["青眼白龙"], vec!["白龙".to_string()]);
    }

    #[tokio::test]
    async fn unloaded_store_refuses_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ygo-alias.json");
        let store = AliasStore::new(&path);

        let err = store.add_alias("C", "a").await.unwrap_err();
        assert!(matches!(err, AliasError::NotLoaded));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn reload_picks_up_external_edits() {
        let (store, _dir) = store_with(Some(r#"{"A": ["a"]}"#)).await;
        std::fs::write(store.path(), r#"{"B": ["b"]}"#).unwrap();

        store.load().await.unwrap();
        assert_eq!(store.resolve("a"), "a");
        assert_eq!(store.resolve("b"), "B");
    }

    #[tokio::test]
    async fn failed_write_leaves_table_unchanged() {
        let (store, _dir) = store_with(None).await;
        // A directory where the document should be makes the rename fail.
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();

        let err = store.add_alias("C", "a").await.unwrap_err();
        assert!(matches!(err, AliasError::Io(_)));
        assert_eq!(store.resolve("a"), "a");
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let (store, dir) = store_with(None).await;
        store.add_alias("A", "a1").await.unwrap();
        store.add_alias("A", "a2").await.unwrap();
        store.add_alias("B", "b1").await.unwrap();
        store.save().await.unwrap();

        let reopened = AliasStore::open(dir.path().join("ygo-alias.json"))
            .await
            .unwrap();
        assert_eq!(*reopened.snapshot(), *store.snapshot());
    }

    #[tokio::test]
    async fn concurrent_adds_of_one_alias_admit_exactly_one() {
        let (store, _dir) = store_with(None).await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_alias(&format!("C{i}"), "shared").await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.snapshot().alias_count(), 1);
        assert_eq!(on_disk(&store).len(), 1);
    }
}
