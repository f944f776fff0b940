//! Key/value persistence with per-item expiry.
//!
//! Items are JSON values stamped with an absolute UTC expiry (milliseconds since the epoch).
//! Expired items read back as absent.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PracticeError;

/// Source of "now" for expiry checks.
pub type Clock = fn() -> DateTime<Utc>;

pub trait Storage {
    fn load_item(&mut self, key: &str) -> Result<Option<Value>, PracticeError>;

    fn save_item(&mut self, key: &str, value: Value, expiry: Duration) -> Result<(), PracticeError>;

    fn delete_item(&mut self, key: &str) -> Result<(), PracticeError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub value: Value,
    /// Expiry as UTC milliseconds since the epoch.
    pub expires: i64,
}

impl StoredItem {
    fn new(value: Value, expiry: Duration, now: DateTime<Utc>) -> Self {
        let expires_at = chrono::Duration::from_std(expiry)
            .ok()
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value,
            expires: expires_at.timestamp_millis(),
        }
    }

    #[inline]
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires
    }
}

/// In-process storage.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, StoredItem>,
    clock: Clock,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            items: HashMap::new(),
            clock,
        }
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Raw stored entry, including expired ones.
    pub fn raw_item(&self, key: &str) -> Option<&StoredItem> {
        self.items.get(key)
    }
}

impl Storage for MemoryStorage {
    fn load_item(&mut self, key: &str) -> Result<Option<Value>, PracticeError> {
        let now = (self.clock)();
        match self.items.get(key) {
            Some(item) if item.is_expired(now) => {
                self.items.remove(key);
                Ok(None)
            }
            Some(item) => Ok(Some(item.value.clone())),
            None => Ok(None),
        }
    }

    fn save_item(&mut self, key: &str, value: Value, expiry: Duration) -> Result<(), PracticeError> {
        let item = StoredItem::new(value, expiry, (self.clock)());
        self.items.insert(key.to_string(), item);
        Ok(())
    }

    fn delete_item(&mut self, key: &str) -> Result<(), PracticeError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object file: `{ key: { "value": ..., "expires": ms } }`.
///
/// The whole file is read and rewritten on every write; expired items are dropped on rewrite.
/// Writes go to `<path>.tmp` first and are renamed over the file, so a torn write never
/// replaces readable progress.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    clock: Clock,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, StoredItem>, PracticeError> {
        let f = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PracticeError::Storage {
                    stage: "storage_open",
                    path: self.path.display().to_string(),
                    error: e.to_string(),
                })
            }
        };
        serde_json::from_reader(BufReader::new(f)).map_err(|e| PracticeError::Storage {
            stage: "storage_parse",
            path: self.path.display().to_string(),
            error: e.to_string(),
        })
    }

    fn write_all(&self, mut items: BTreeMap<String, StoredItem>) -> Result<(), PracticeError> {
        let now = (self.clock)();
        items.retain(|_, item| !item.is_expired(now));

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| PracticeError::Storage {
                stage: "storage_create_dir",
                path: dir.display().to_string(),
                error: e.to_string(),
            })?;
        }

        let tmp = self.tmp_path();
        let f = fs::File::create(&tmp).map_err(|e| PracticeError::Storage {
            stage: "storage_create",
            path: tmp.display().to_string(),
            error: e.to_string(),
        })?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &items).map_err(|e| PracticeError::Storage {
            stage: "storage_serialize",
            path: tmp.display().to_string(),
            error: e.to_string(),
        })?;
        w.flush().map_err(|e| PracticeError::Storage {
            stage: "storage_flush",
            path: tmp.display().to_string(),
            error: e.to_string(),
        })?;
        drop(w);
        fs::rename(&tmp, &self.path).map_err(|e| PracticeError::Storage {
            stage: "storage_rename",
            path: self.path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Sibling file the next write goes to before it replaces [`Self::path`].
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Storage for JsonFileStorage {
    fn load_item(&mut self, key: &str) -> Result<Option<Value>, PracticeError> {
        let now = (self.clock)();
        Ok(self
            .read_all()?
            .remove(key)
            .filter(|item| !item.is_expired(now))
            .map(|item| item.value))
    }

    fn save_item(&mut self, key: &str, value: Value, expiry: Duration) -> Result<(), PracticeError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), StoredItem::new(value, expiry, (self.clock)()));
        self.write_all(items)
    }

    fn delete_item(&mut self, key: &str) -> Result<(), PracticeError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(items)?;
        }
        Ok(())
    }
}
