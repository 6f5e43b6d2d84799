//! Per-user key-value persistence and the favourites list built on it.
//!
//! Components receive a [`KeyValueStore`] instead of reaching for browser
//! storage directly. Every entry is namespaced by a [`UserScope`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StayError};

const FAVORITES_KEY: &str = "favorites";

/// Opaque identifier that namespaces stored values per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserScope(String);

impl UserScope {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// String key-value storage scoped by user.
pub trait KeyValueStore {
    fn get(&self, scope: &UserScope, key: &str) -> Result<Option<String>>;
    fn set(&mut self, scope: &UserScope, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, scope: &UserScope, key: &str) -> Result<()>;
}

/// In-process store, used by the CLI and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<(UserScope, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, scope: &UserScope, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(&(scope.clone(), key.to_string())).cloned())
    }

    fn set(&mut self, scope: &UserScope, key: &str, value: String) -> Result<()> {
        self.entries.insert((scope.clone(), key.to_string()), value);
        Ok(())
    }

    fn remove(&mut self, scope: &UserScope, key: &str) -> Result<()> {
        self.entries.remove(&(scope.clone(), key.to_string()));
        Ok(())
    }
}

/// Store persisted as a single JSON document: `{ scope: { key: value } }`.
///
/// The whole file is rewritten on every mutation. A mutation that cannot be
/// persisted is not applied in memory either.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns [`StayError::Storage`] if the file cannot be read and
    /// [`StayError::Payload`] if it is not a valid store document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StayError::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then adopt them as the in-memory state.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// store, so a failed write leaves both the file and `self` unchanged.
    fn commit(&mut self, entries: BTreeMap<String, BTreeMap<String, String>>) -> Result<()> {
        let raw = serde_json::to_string_pretty(&entries)?;
        let tmp = self.temp_path();
        let storage_err = |e: std::io::Error| {
            StayError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        };
        fs::write(&tmp, raw).map_err(storage_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(storage_err(e));
        }
        debug!(path = %self.path.display(), "store flushed");
        self.entries = entries;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, scope: &UserScope, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(scope.as_str())
            .and_then(|m| m.get(key))
            .cloned())
    }

    fn set(&mut self, scope: &UserScope, key: &str, value: String) -> Result<()> {
        let mut updated = self.entries.clone();
        updated
            .entry(scope.as_str().to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.commit(updated)
    }

    fn remove(&mut self, scope: &UserScope, key: &str) -> Result<()> {
        let mut updated = self.entries.clone();
        if let Some(m) = updated.get_mut(scope.as_str()) {
            m.remove(key);
            if m.is_empty() {
                updated.remove(scope.as_str());
            }
        }
        self.commit(updated)
    }
}

/// A user's favourite venues, stored as a JSON array of venue ids.
///
/// Insertion order is kept. A stored value that is not a JSON string array is
/// reported as [`StayError::Payload`](crate::StayError::Payload) rather than
/// being overwritten.
pub struct Favorites<S> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn list(&self, scope: &UserScope) -> Result<Vec<String>> {
        match self.store.get(scope, FAVORITES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn contains(&self, scope: &UserScope, venue_id: &str) -> Result<bool> {
        Ok(self.list(scope)?.iter().any(|id| id == venue_id))
    }

    /// Add a venue. Adding one that is already present is a no-op.
    pub fn add(&mut self, scope: &UserScope, venue_id: &str) -> Result<()> {
        let mut ids = self.list(scope)?;
        if !ids.iter().any(|id| id == venue_id) {
            ids.push(venue_id.to_string());
            self.save(scope, &ids)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, scope: &UserScope, venue_id: &str) -> Result<()> {
        let mut ids = self.list(scope)?;
        let before = ids.len();
        ids.retain(|id| id != venue_id);
        if ids.len() == before {
            return Ok(());
        }
        if ids.is_empty() {
            self.store.remove(scope, FAVORITES_KEY)
        } else {
            self.save(scope, &ids)
        }
    }

    /// Flip membership and return whether the venue is now a favourite.
    pub fn toggle(&mut self, scope: &UserScope, venue_id: &str) -> Result<bool> {
        if self.contains(scope, venue_id)? {
            self.remove(scope, venue_id)?;
            Ok(false)
        } else {
            self.add(scope, venue_id)?;
            Ok(true)
        }
    }

    fn save(&mut self, scope: &UserScope, ids: &[String]) -> Result<()> {
        let raw = serde_json::to_string(ids)?;
        self.store.set(scope, FAVORITES_KEY, raw)
    }
}
