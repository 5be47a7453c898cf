//! Client-side cart badge counter.
//!
//! The cart is a display counter only: one non-negative integer persisted
//! under [`CART_COUNT_KEY`] in a small key-value storage. The in-memory value
//! is authoritative for the session; storage failures are logged and never
//! surfaced to callers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::watch;

/// Storage key holding the cart count.
pub const CART_COUNT_KEY: &str = "sc_cart_count";

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("cart storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cart storage at {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cart storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage backing the cart counter.
pub trait CartStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`CartStorageError`] if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CartStorageError`] if the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError>;
}

/// Storage persisted as a flat JSON object in a single file.
///
/// Values are written as strings. Non-string values already in the file are
/// read back in their JSON text form (`3` reads as `"3"`) and are preserved
/// when other keys are written. A missing file reads as empty. Writes go through a temporary sibling file
/// and a rename so a crash never leaves a half-written object behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, serde_json::Value>, CartStorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(CartStorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| CartStorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn io_err(&self, source: std::io::Error) -> CartStorageError {
        CartStorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.read_map()?.remove(key).and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(CartStorageError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "replacing corrupt cart storage");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_owned(), serde_json::Value::String(value.to_owned()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let body = serde_json::to_string_pretty(&map).map_err(|source| CartStorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}

/// In-process storage, used in tests and when no file path is wanted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
    disabled: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every read and write, as when the client has
    /// storage disabled or its quota is exhausted.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            values: Mutex::default(),
            disabled: true,
        }
    }

    /// Seeds a raw value, bypassing the cart.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    fn check_enabled(&self) -> Result<(), CartStorageError> {
        if self.disabled {
            Err(CartStorageError::Unavailable("storage disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        self.check_enabled()?;
        let values = self
            .values
            .lock()
            .map_err(|_| CartStorageError::Unavailable("storage lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        self.check_enabled()?;
        let mut values = self
            .values
            .lock()
            .map_err(|_| CartStorageError::Unavailable("storage lock poisoned".to_string()))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Cart counter with subscribe/update operations.
///
/// Holds the single writer side of a `watch` channel; views call
/// [`CartStore::subscribe`] to follow the count.
pub struct CartStore<S: CartStorage> {
    storage: S,
    count: watch::Sender<u32>,
}

impl<S: CartStorage> CartStore<S> {
    /// Opens the cart, reading the persisted count once.
    ///
    /// Absent or non-numeric values start the cart at zero. A storage read
    /// failure is logged and also starts at zero.
    pub fn open(storage: S) -> Self {
        let initial = match storage.get(CART_COUNT_KEY) {
            Ok(Some(raw)) => parse_count(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "stored cart count is not a number; starting at 0");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "cart storage unreadable; starting at 0");
                0
            }
        };
        let (count, _) = watch::channel(initial);
        Self { storage, count }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        *self.count.borrow()
    }

    /// Receiver that observes every change to the count.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.count.subscribe()
    }

    pub fn increment(&self) -> u32 {
        self.update(|c| c.saturating_add(1))
    }

    /// Decrements the count, clamping at zero.
    pub fn decrement(&self) -> u32 {
        self.update(|c| c.saturating_sub(1))
    }

    pub fn reset(&self) -> u32 {
        self.update(|_| 0)
    }

    pub fn set(&self, value: u32) -> u32 {
        self.update(|_| value)
    }

    /// Applies `f` to the count, notifying subscribers and persisting only
    /// when the value changes.
    fn update(&self, f: impl FnOnce(u32) -> u32) -> u32 {
        let changed = self.count.send_if_modified(|c| {
            let next = f(*c);
            if next == *c {
                false
            } else {
                *c = next;
                true
            }
        });
        let current = self.count();
        if changed {
            self.persist(current);
        }
        current
    }

    fn persist(&self, value: u32) {
        if let Err(e) = self.storage.set(CART_COUNT_KEY, &value.to_string()) {
            tracing::warn!(error = %e, count = value, "failed to persist cart count; keeping in-memory value");
        }
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u32>().ok()
}
