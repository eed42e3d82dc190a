//! # String Store
//!
//! Keyed persistence for analyzed strings. Each [`StringRecord`] is stored
//! under its content hash, serialized as JSON, in a pluggable
//! [`StoreBackend`]:
//!
//! - An in-memory `BTreeMap` backend for tests and ephemeral deployments.
//! - A Redb backend for on-disk storage (feature `backend-redb`, on by default).
//!
//! [`RecordStore`] layers record semantics on top: create refuses duplicates,
//! find/delete work by identifier, and list returns a snapshot in key order.
//!
//! ```
//! use store::{BackendConfig, RecordStore, StringRecord};
//!
//! let store = RecordStore::open(&BackendConfig::in_memory()).unwrap();
//! let record = StringRecord::new("racecar");
//! store.create(&record).unwrap();
//!
//! assert!(store.find(&record.id).unwrap().is_some());
//! assert_eq!(store.list().unwrap().len(), 1);
//! ```

mod backend;

#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use backend::{BackendConfig, InMemoryBackend, StoreBackend};

use analysis::StringProperties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

/// A stored string with its derived properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StringRecord {
    /// SHA-256 hex of `value`.
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and stamp the record with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    pub fn with_timestamp(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analysis::analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }
}

/// Store error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {0} already exists")]
    AlreadyExists(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("record encode error: {0}")]
    Encode(String),
    #[error("record decode error: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Record-level access to a [`StoreBackend`].
pub struct RecordStore {
    backend: Box<dyn StoreBackend>,
    // Serializes check-then-write so concurrent creates of one id cannot both win.
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Build the configured backend and wrap it.
    pub fn open(config: &BackendConfig) -> Result<Self, StoreError> {
        Ok(Self::new(config.build()?))
    }

    /// Insert a new record. Fails with [`StoreError::AlreadyExists`] when the
    /// identifier is taken.
    pub fn create(&self, record: &StringRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Encode(e.to_string()))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if self.backend.get(&record.id)?.is_some() {
            return Err(StoreError::AlreadyExists(record.id.clone()));
        }
        self.backend.put(&record.id, &bytes)?;
        self.backend.flush()?;

        tracing::info!(id = %record.id, length = record.properties.length, "stored string");
        Ok(())
    }

    pub fn find(&self, id: &str) -> Result<Option<StringRecord>, StoreError> {
        self.backend
            .get(id)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Remove a record, returning whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let removed = self.backend.delete(id)?;
        if removed {
            self.backend.flush()?;
            tracing::info!(id = %id, "deleted string");
        }
        Ok(removed)
    }

    /// Snapshot of every record in key order.
    pub fn list(&self) -> Result<Vec<StringRecord>, StoreError> {
        let mut records = Vec::new();
        self.backend.scan(&mut |bytes| {
            records.push(decode(bytes)?);
            Ok(())
        })?;
        Ok(records)
    }

    /// Number of stored records. Walks the backend without decoding values.
    pub fn count(&self) -> Result<usize, StoreError> {
        let mut count = 0;
        self.backend.scan(&mut |_| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }
}

fn decode(bytes: &[u8]) -> Result<StringRecord, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}
