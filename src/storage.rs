//! # Local State Store
//!
//! A small string key-value store for the handful of values folio remembers
//! between runs: the preferred skin, the HTML theme and cached repository
//! lists. Reads and writes never fail from the caller's point of view; I/O
//! problems are logged and the store behaves as if the key were absent.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Keys persisted in the state store
pub mod keys {
    /// Preferred skin (`modern` or `retro`)
    pub const UI_CHOICE: &str = "portfolio_ui_choice_v1";
    /// HTML theme (`light` or `dark`)
    pub const THEME: &str = "portfolio_theme_v1";
    /// Prefix of the per-username repository cache entries
    pub const REPO_CACHE_PREFIX: &str = "gh_repos_cache_v1_";

    /// Cache key for one GitHub username
    pub fn repo_cache(username: &str) -> String {
        format!("{REPO_CACHE_PREFIX}{username}")
    }
}

/// String key-value storage shared by the skins and the chooser
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str);

    /// Remove `key` entirely
    fn remove(&self, key: &str);
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store, used when no state file is wanted and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        lock(&self.entries).remove(key);
    }
}

/// Store backed by a JSON object on disk, written through on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing or corrupt file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Entries>(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                Entries::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => {
                tracing::warn!("Could not read state file {}: {}", path.display(), e);
                Entries::new()
            }
        };

        tracing::debug!(
            "Opened state store {} with {} entries",
            path.display(),
            entries.len()
        );
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &Entries) {
        if let Err(e) = self.write_atomically(entries) {
            tracing::warn!("Could not write state file {}: {}", self.path.display(), e);
        }
    }

    fn write_atomically(&self, entries: &Entries) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        file.persist(&self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}
