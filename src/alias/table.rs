//! In-memory alias table.
//!
//! Maps canonical names to alias lists and keeps a reverse index so that
//! resolution is a single lookup. The table upholds three invariants:
//!
//! - an alias belongs to at most one canonical name
//! - an alias list never contains the same alias twice
//! - a canonical name with no aliases is not stored
//!
//! Both maps are `im` persistent maps, so cloning a table for a
//! copy-on-write mutation is cheap.

use crate::error::AliasError;
use std::collections::BTreeMap;
use tracing::warn;

/// On-disk shape of the table: canonical name -> aliases.
pub type AliasDocument = BTreeMap<String, Vec<String>>;

/// Canonical name -> alias list, plus alias -> canonical index.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: im::OrdMap<String, Vec<String>>,
    owners: im::HashMap<String, String>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a loaded document, repairing invariant violations.
    ///
    /// Duplicate aliases within a list are collapsed and empty lists are
    /// dropped. An alias claimed by more than one canonical name stays with
    /// the first one in key order.
    pub fn from_document(doc: AliasDocument) -> Self {
        let mut table = Self::new();

        for (canonical, aliases) in doc {
            for alias in aliases {
                match table.owners.get(&alias) {
                    Some(owner) if *owner == canonical => {
                        warn!(canonical = %canonical, alias = %alias, "Duplicate alias in document, collapsed");
                    }
                    Some(owner) => {
                        warn!(
                            canonical = %canonical,
                            alias = %alias,
                            owner = %owner,
                            "Alias claimed by two canonical names, keeping first owner"
                        );
                    }
                    None => table.push(&canonical, alias),
                }
            }
        }

        table
    }

    /// Snapshot of the table in document form (sorted keys).
    pub fn to_document(&self) -> AliasDocument {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Canonical name owning `name` as an alias, or `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.owners.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Canonical name owning `alias`, if any.
    pub fn owner(&self, alias: &str) -> Option<&str> {
        self.owners.get(alias).map(String::as_str)
    }

    /// Aliases of `canonical`, if it has any.
    pub fn aliases(&self, canonical: &str) -> Option<&[String]> {
        self.entries.get(canonical).map(Vec::as_slice)
    }

    /// Iterate entries in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of aliases across all entries.
    pub fn alias_count(&self) -> usize {
        self.owners.len()
    }

    /// Add `alias` to `canonical`.
    ///
    /// Fails with [`AliasError::Exists`] if the pair is already present and
    /// with [`AliasError::Conflict`] if another canonical name owns `alias`.
    /// The table is unchanged on failure.
    pub fn insert(&mut self, canonical: &str, alias: &str) -> Result<(), AliasError> {
        if let Some(owner) = self.owners.get(alias) {
            return Err(if owner == canonical {
                AliasError::Exists {
                    canonical: canonical.to_string(),
                    alias: alias.to_string(),
                }
            } else {
                AliasError::Conflict {
                    alias: alias.to_string(),
                    owner: owner.clone(),
                }
            });
        }

        self.push(canonical, alias.to_string());
        Ok(())
    }

    /// Remove `alias` from `canonical`, dropping the entry if it becomes empty.
    ///
    /// Fails with [`AliasError::NotFound`] if the pair is not present.
    pub fn remove(&mut self, canonical: &str, alias: &str) -> Result<(), AliasError> {
        if self.owner(alias) != Some(canonical) {
            return Err(AliasError::NotFound {
                canonical: canonical.to_string(),
                alias: alias.to_string(),
            });
        }

        self.owners.remove(alias);
        let now_empty = match self.entries.get_mut(canonical) {
            Some(list) => {
                list.retain(|a| a != alias);
                list.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.entries.remove(canonical);
        }
        Ok(())
    }

    // Caller has checked that `alias` is unowned.
    fn push(&mut self, canonical: &str, alias: String) {
        self.owners.insert(alias.clone(), canonical.to_string());
        match self.entries.get_mut(canonical) {
            Some(list) => list.push(alias),
            None => {
                self.entries.insert(canonical.to_string(), vec![alias]);
            }
        }
    }
}

impl PartialEq for AliasTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AliasTable {}
