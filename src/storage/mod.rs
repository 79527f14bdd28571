//! Persistence for ranked lists
//!
//! Loading never fails: anything missing or unreadable degrades to an empty
//! list so the engine always starts. Saving reports errors to the caller.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::error::Result;
use crate::core::types::RankedItem;
use crate::ranking::list::RankedList;

/// Loads and saves a ranked list under an opaque key
pub trait RankingStore {
    /// Load the list stored under `key`, or an empty list
    fn load(&self, key: &str) -> RankedList;

    /// Persist `list` under `key` in rank order
    fn save(&self, key: &str, list: &RankedList) -> Result<()>;
}

/// Parse a serialized list, or `None` when the data is unusable
pub fn decode_list(json: &str) -> Option<RankedList> {
    let items: Vec<RankedItem> = match serde_json::from_str(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "stored rankings are malformed");
            return None;
        }
    };

    match RankedList::from_items(items) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::warn!(error = %e, "stored rankings are inconsistent");
            None
        }
    }
}

pub fn encode_list(list: &RankedList) -> Result<String> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl RankingStore for JsonFileStore {
    fn load(&self, key: &str) -> RankedList {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!(?path, "no saved rankings yet");
            return RankedList::new();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(?path, error = %e, "failed to read rankings, starting empty");
                return RankedList::new();
            }
        };

        let list = decode_list(&contents).unwrap_or_default();
        tracing::debug!(?path, len = list.len(), "rankings loaded");
        list
    }

    fn save(&self, key: &str, list: &RankedList) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, encode_list(list)?)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(?path, len = list.len(), "rankings saved");
        Ok(())
    }
}

/// In-process store, serialized the same way as the file store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed raw serialized data under `key`
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), raw.into());
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl RankingStore for MemoryStore {
    fn load(&self, key: &str) -> RankedList {
        self.raw(key)
            .and_then(|raw| decode_list(&raw))
            .unwrap_or_default()
    }

    fn save(&self, key: &str, list: &RankedList) -> Result<()> {
        let raw = encode_list(list)?;
        self.insert_raw(key, raw);
        Ok(())
    }
}
