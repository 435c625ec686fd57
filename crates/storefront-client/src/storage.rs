//! # Cart Snapshot Cache
//!
//! A flat key-value cache holding one JSON snapshot of the cart.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Cache                                           │
//! │                                                                         │
//! │  CartStorage ── key "example-store-cart" ──► dyn KeyValueStore          │
//! │                                                  │                      │
//! │                                   ┌──────────────┴──────────────┐       │
//! │                                   ▼                             ▼       │
//! │                             MemoryStore                    FileStore    │
//! │                             (HashMap, tests)               {dir}/{key}.json
//! │                                                                         │
//! │  Value: {"1":{"name":"Product 1","price":42,"count":1}}                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::CartState;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Key the cart snapshot is stored under.
pub const LOCAL_STORAGE_CART_KEY: &str = "example-store-cart";

// =============================================================================
// Key-Value Backends
// =============================================================================

/// A synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Stores a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Deletes a value. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Store keeping one `{key}.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> ClientResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(ClientError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = value.len(), "Wrote cache entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Cart Storage
// =============================================================================

/// Persists and restores the cart snapshot under a single key.
#[derive(Clone)]
pub struct CartStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStorage").field("key", &self.key).finish()
    }
}

impl CartStorage {
    /// Cart storage under the default key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, LOCAL_STORAGE_CART_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        CartStorage {
            store,
            key: key.into(),
        }
    }

    /// In-memory cart storage.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the snapshot, failing on unreadable or corrupt data.
    ///
    /// A missing snapshot is an empty cart.
    pub fn load(&self) -> ClientResult<CartState> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(CartState::new()),
        }
    }

    /// Reads the snapshot, treating any failure as an empty cart.
    pub fn get_state(&self) -> CartState {
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Discarding unreadable cart snapshot");
            CartState::new()
        })
    }

    /// Writes the snapshot.
    pub fn set_state(&self, cart: &CartState) -> ClientResult<()> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, items = cart.item_count(), "Saved cart snapshot");
        Ok(())
    }

    /// Deletes the snapshot.
    pub fn clear(&self) -> ClientResult<()> {
        self.store.remove(&self.key)
    }
}
