//! Durable key-value storage for the cart.
//!
//! The cart serializes its whole line-item list on every mutation and reads
//! it back once at startup. Storage is a plain string key-value seam so the
//! same cart logic runs against memory (tests) or a directory of JSON files
//! (the CLI).

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CartLineItem;

/// Current version of the persisted cart payload.
pub const CART_PAYLOAD_VERSION: u32 = 1;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value store.
///
/// Methods take `&self`; backends handle their own synchronization.
pub trait CartStorage: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for storage. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Payload Encoding
// =============================================================================

#[derive(Serialize)]
struct VersionedPayloadRef<'a> {
    version: u32,
    items: &'a [CartLineItem],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Versioned {
        version: u32,
        items: Vec<CartLineItem>,
    },
    /// Bare array written before payloads carried a version.
    Legacy(Vec<CartLineItem>),
}

/// Serialize line items into the current versioned payload.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_items(items: &[CartLineItem]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&VersionedPayloadRef {
        version: CART_PAYLOAD_VERSION,
        items,
    })?)
}

/// Deserialize a stored payload.
///
/// Returns `None` for payloads of an unknown version or shape; the caller
/// starts with an empty cart. Stored quantities of zero are raised to one.
#[must_use]
pub fn decode_items(payload: &str) -> Option<Vec<CartLineItem>> {
    let mut items = match serde_json::from_str::<StoredPayload>(payload) {
        Ok(StoredPayload::Versioned { version, items }) if version == CART_PAYLOAD_VERSION => {
            items
        }
        Ok(StoredPayload::Versioned { version, .. }) => {
            tracing::warn!(version, "Discarding cart payload with unsupported version");
            return None;
        }
        Ok(StoredPayload::Legacy(items)) => {
            tracing::info!(items = items.len(), "Upgrading unversioned cart payload");
            items
        }
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable cart payload");
            return None;
        }
    };

    for item in &mut items {
        item.quantity = item.quantity.max(1);
    }
    Some(items)
}
