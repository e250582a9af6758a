//! Durable storage of the full expense list.
//!
//! A `Slot` is a place that holds one text value per key: a JSON file on disk, or a map in
//! memory. `Persistence` writes the whole expense list into one fixed key and reads it back.

use crate::model::Expense;
use crate::{utils, Result};
use anyhow::Context;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace, warn};

/// The key that the expense list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Key-value storage for text values.
#[async_trait::async_trait]
pub trait Slot {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    async fn read(&mut self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing whatever was there.
    async fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A `Slot` that keeps each key in a `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file that holds `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl Slot for FileSlot {
    async fn read(&mut self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !utils::exists(&path).await? {
            return Ok(None);
        }
        utils::read(&path).await.map(Some)
    }

    async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        utils::write(self.path(key), value).await
    }
}

/// A `Slot` held in memory.
///
/// Clones share the same map, so a test can keep a handle and look at what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Puts `value` under `key` directly, bypassing `Persistence`.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.lock().insert(key.to_string(), value.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a usable map.
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl Slot for MemorySlot {
    async fn read(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(key, value);
        Ok(())
    }
}

/// Saves and restores the expense list to a single key in a `Slot`.
pub struct Persistence {
    slot: Box<dyn Slot + Send>,
    key: String,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(slot: Box<dyn Slot + Send>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes all of `records` and overwrites the stored value.
    pub async fn save(&mut self, records: &[Expense]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Unable to serialize the expense list")?;
        self.slot
            .write(&self.key, &json)
            .await
            .with_context(|| format!("Unable to save expenses to '{}'", self.key))?;
        trace!("Saved {} expenses to '{}'", records.len(), self.key);
        Ok(())
    }

    /// Reads the stored expense list.
    ///
    /// Nothing stored, a value that cannot be read and a value that cannot be parsed all
    /// produce an empty list.
    pub async fn restore(&mut self) -> Vec<Expense> {
        let stored = match self.slot.read(&self.key).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("Nothing stored under '{}', starting empty", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Unable to read stored expenses, starting empty: {e:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Expense>>(&stored) {
            Ok(records) => {
                debug!("Restored {} expenses from '{}'", records.len(), self.key);
                records
            }
            Err(e) => {
                warn!(
                    "The expenses stored under '{}' could not be parsed, starting empty: {e}",
                    self.key
                );
                Vec::new()
            }
        }
    }
}
