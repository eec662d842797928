//! Key-value record persistence.
//!
//! Every record (ring data, last assessment, profile, trackers) is stored as
//! one JSON document under its own key. Reads take a shared lock; writes go
//! through a locked temp file that is renamed over the old record.

use crate::{BiometricSnapshot, BodyIntelligence, Error, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Record keys
pub mod keys {
    pub const RING_DATA: &str = "gabbitRingData";
    pub const BODY_INTELLIGENCE: &str = "bodyIntelligence";
    pub const USER: &str = "healthAkhadaUser";
    pub const WORKOUTS: &str = "healthAkhadaWorkouts";
    pub const NUTRITION: &str = "nutritionTracker";
    pub const PROGRESS: &str = "progressTracker";
}

/// Storage backend for serialized records
pub trait KeyValueStore {
    /// Raw record for `key`, or `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used for dry runs and tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per record
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::Store("record key must not be empty".into()));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::Store(format!("invalid record key: {:?}", key)));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            return Err(e.into());
        }

        file.unlock()?;
        tracing::debug!("Read record {} from {:?}", key, path);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved record {} to {:?}", key, path);
        Ok(())
    }
}

/// Load and decode a record
///
/// Returns `None` if the record is absent, unreadable, or malformed; the
/// latter two are logged as warnings.
pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No stored record for {}", key);
            return None;
        }
        Err(e) => {
            tracing::warn!("Unable to read record {}: {}. Using defaults.", key, e);
            return None;
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to parse record {}: {}. Using defaults.", key, e);
            None
        }
    }
}

/// Encode and store a record
pub fn save_record<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    // Compact JSON, matching what the dashboard writes
    let contents = serde_json::to_string(value)?;
    store.set(key, &contents)
}

/// Stored ring snapshot, or the compiled-in baseline if there is none
pub fn load_snapshot(store: &dyn KeyValueStore, now: DateTime<Utc>) -> BiometricSnapshot {
    match load_record::<BiometricSnapshot>(store, keys::RING_DATA) {
        Some(snapshot) if snapshot.is_finite() => snapshot,
        Some(_) => {
            tracing::warn!("Stored ring data has non-finite readings. Using baseline.");
            BiometricSnapshot::baseline(now)
        }
        None => BiometricSnapshot::baseline(now),
    }
}

pub fn save_snapshot(store: &mut dyn KeyValueStore, snapshot: &BiometricSnapshot) -> Result<()> {
    save_record(store, keys::RING_DATA, snapshot)
}

/// Last persisted assessment, if any
pub fn load_body_intelligence(store: &dyn KeyValueStore) -> Option<BodyIntelligence> {
    load_record(store, keys::BODY_INTELLIGENCE)
}

pub fn save_body_intelligence(
    store: &mut dyn KeyValueStore,
    record: &BodyIntelligence,
) -> Result<()> {
    save_record(store, keys::BODY_INTELLIGENCE, record)
}
