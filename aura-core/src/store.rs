//! Entry persistence
//!
//! The entry collection lives as one JSON array under a fixed key in the
//! keyed store, newest entry first. Loading never fails: a missing key, an
//! unreadable row or corrupt JSON all fall back to an empty collection.

use crate::db::Database;
use crate::error::Result;
use crate::types::Entry;

/// Load/save interface for the entry collection.
pub trait EntryStore {
    /// Load every entry, newest first. Falls back to an empty collection.
    fn load(&self) -> Vec<Entry>;

    /// Replace the stored collection.
    fn save(&self, entries: &[Entry]) -> Result<()>;
}

/// [`EntryStore`] backed by a [`Database`] key.
pub struct KeyedEntryStore<'a> {
    db: &'a Database,
    key: String,
}

impl<'a> KeyedEntryStore<'a> {
    /// Create a store reading and writing `key`.
    pub fn new(db: &'a Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Prepend `entry` and save. Returns the new collection size.
    pub fn add(&self, entry: Entry) -> Result<usize> {
        let mut entries = self.load();
        entries.insert(0, entry);
        self.save(&entries)?;
        Ok(entries.len())
    }

    /// Remove the entry with `id`. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    /// Drop the whole collection.
    pub fn clear(&self) -> Result<()> {
        self.db.delete_value(&self.key)?;
        Ok(())
    }
}

impl EntryStore for KeyedEntryStore<'_> {
    fn load(&self) -> Vec<Entry> {
        let raw = match self.db.get_value(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read entries, using empty collection");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => {
                tracing::debug!(key = %self.key, count = entries.len(), "Loaded entries");
                entries
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored entries are corrupt, using empty collection");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.db.put_value(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = entries.len(), "Saved entries");
        Ok(())
    }
}
