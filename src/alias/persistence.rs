//! Persistence functions for the alias table.
//!
//! The document is a JSON object of canonical name -> alias array, written
//! pretty-printed with sorted keys so that hand edits diff cleanly.

use super::table::{AliasDocument, AliasTable};
use crate::error::AliasError;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::btree_map::Entry;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load the table. Returns `Ok(None)` if the document does not exist.
pub(super) async fn load(path: &Path) -> Result<Option<AliasTable>, AliasError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AliasError::Io(e)),
    };

    let LoadedDocument(doc) = serde_json::from_slice(&bytes)?;
    Ok(Some(AliasTable::from_document(doc)))
}

/// Document as read from disk.
///
/// A canonical name that appears more than once in the JSON object has its
/// alias lists concatenated instead of the last one silently winning.
struct LoadedDocument(AliasDocument);

impl<'de> Deserialize<'de> for LoadedDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = LoadedDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of canonical name to alias array")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = AliasDocument::new();
        while let Some((canonical, aliases)) = map.next_entry::<String, Vec<String>>()? {
            match doc.entry(canonical) {
                Entry::Vacant(slot) => {
                    slot.insert(aliases);
                }
                Entry::Occupied(mut slot) => {
                    warn!(canonical = %slot.key(), "Canonical name repeated in document, merging alias lists");
                    slot.get_mut().extend(aliases);
                }
            }
        }
        Ok(LoadedDocument(doc))
    }
}

/// Save the table, creating parent directories as needed.
///
/// Uses atomic write (temp file + rename) to prevent corruption.
pub(super) async fn save(table: &AliasTable, path: &Path) -> Result<(), AliasError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut body = serde_json::to_vec_pretty(&table.to_document())?;
    body.push(b'\n');

    // Write to temp file first
    let temp_path = temp_path(path);
    tokio::fs::write(&temp_path, &body).await?;

    // Atomic rename
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(AliasError::Io(e));
    }

    debug!(path = %path.display(), entries = table.len(), "Alias table saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
