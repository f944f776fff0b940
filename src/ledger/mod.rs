//! Which practice puzzles the player has beaten.
//!
//! A [`CompletionLedger`] only exists once its storage has been read ([`CompletionLedger::open`]),
//! so there is no "not loaded yet" state to guard against at runtime. Progress can still be
//! wiped before a ledger exists with [`erase_progress`].

pub mod storage;

use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{PracticeConfig, DEFAULT_PROGRESS_KEY, PROGRESS_EXPIRY};
use crate::error::PracticeError;
use crate::puzzle::PuzzleId;

pub use storage::{JsonFileStorage, MemoryStorage, Storage};

#[derive(Debug)]
pub struct CompletionLedger<S> {
    storage: S,
    key: String,
    expiry: Duration,
    beaten: BTreeSet<PuzzleId>,
}

impl<S: Storage> CompletionLedger<S> {
    /// Loads progress under the default key with the fixed one-year expiry.
    pub fn open(storage: S) -> Result<Self, PracticeError> {
        Self::open_at(storage, DEFAULT_PROGRESS_KEY, PROGRESS_EXPIRY)
    }

    pub fn open_with(storage: S, config: &PracticeConfig) -> Result<Self, PracticeError> {
        Self::open_at(storage, &config.progress_key, config.progress_expiry)
    }

    fn open_at(mut storage: S, key: &str, expiry: Duration) -> Result<Self, PracticeError> {
        let beaten = match storage.load_item(key)? {
            None => BTreeSet::new(),
            Some(value) => decode_beaten(key, value),
        };
        debug!(key, beaten = beaten.len(), "loaded practice progress");
        Ok(Self {
            storage,
            key: key.to_string(),
            expiry,
            beaten,
        })
    }

    #[inline]
    pub fn beaten(&self) -> &BTreeSet<PuzzleId> {
        &self.beaten
    }

    #[inline]
    pub fn is_beaten(&self, id: &str) -> bool {
        self.beaten.contains(id)
    }

    /// Records `id` as beaten and persists the full set (even when it was already present,
    /// which refreshes the expiry). Returns whether `id` was newly added.
    ///
    /// A failed save leaves the in-memory set as it was.
    pub fn mark_beaten(&mut self, id: &PuzzleId) -> Result<bool, PracticeError> {
        let added = self.beaten.insert(id.clone());
        let ids: Vec<&str> = self.beaten.iter().map(PuzzleId::as_str).collect();
        if let Err(e) = self
            .storage
            .save_item(&self.key, Value::from(ids), self.expiry)
        {
            if added {
                self.beaten.remove(id);
            }
            return Err(e);
        }
        if added {
            info!(puzzle = %id, "checkmate practice puzzle beaten");
        }
        Ok(added)
    }

    /// Clears both the persisted and the in-memory progress.
    pub fn erase(&mut self) -> Result<(), PracticeError> {
        self.storage.delete_item(&self.key)?;
        self.beaten.clear();
        info!(key = %self.key, "checkmate practice progress erased");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Deletes persisted progress without loading it.
pub fn erase_progress<S: Storage>(storage: &mut S, key: &str) -> Result<(), PracticeError> {
    storage.delete_item(key)?;
    info!(key, "checkmate practice progress erased");
    Ok(())
}

fn decode_beaten(key: &str, value: Value) -> BTreeSet<PuzzleId> {
    let ids: Vec<String> = match serde_json::from_value(value) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable practice progress");
            return BTreeSet::new();
        }
    };
    ids.into_iter()
        .filter_map(|raw| match PuzzleId::try_from(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(key, error = %e, "dropping unreadable beaten puzzle");
                None
            }
        })
        .collect()
}
