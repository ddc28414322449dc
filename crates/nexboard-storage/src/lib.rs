//! Storage abstraction layer for NexBoard.
//!
//! Provides the [`Storage`] trait that the session layer writes identity
//! snapshots, the "remember me" flag, and registered accounts through,
//! plus two backends:
//!
//! - [`MemoryStorage`] — an in-process map. Used for short-lived (per-tab)
//!   storage and in tests.
//! - [`FileStorage`] — one file per key in a directory. Used for
//!   long-lived storage that survives a restart.
//!
//! # Change notifications
//!
//! Several handles can share one backing store, the way several browser
//! tabs share one `localStorage`. Every write is published on a broadcast
//! channel tagged with the [`HandleId`] of the handle that made it, so a
//! subscriber can ignore its own writes and react only to other tabs.
//!
//! # Feature Flags
//!
//! - `fs` (default) — the file-backed [`FileStorage`] backend

mod error;
#[cfg(feature = "fs")]
mod file;
mod memory;

pub use error::StorageError;
#[cfg(feature = "fs")]
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::broadcast;

/// How many change notifications a slow subscriber may fall behind by
/// before older ones are dropped.
pub(crate) const EVENT_CAPACITY: usize = 64;

/// A storage handle shared between the components that write through it.
pub type SharedStorage = Arc<dyn Storage>;

/// Opaque identifier for one handle onto a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

impl HandleId {
    /// Creates a new `HandleId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Creates a random `HandleId`.
    ///
    /// Handles are created independently (one per tab, one per restart),
    /// so there is no shared counter to draw from.
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{:016x}", self.0)
    }
}

/// A change made to a store by some handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that was written or removed.
    pub key: String,

    /// The handle that made the change.
    pub origin: HandleId,
}

/// A key/value store holding raw bytes.
///
/// All methods are synchronous: every backend is local, so there is no
/// latency worth hiding behind a future.
pub trait Storage: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Returns the identifier of this handle.
    fn handle_id(&self) -> HandleId;

    /// Subscribes to changes made through any handle on the same store.
    ///
    /// Defaults to `None` for stores that can't be shared.
    fn subscribe(&self) -> Option<broadcast::Receiver<StorageEvent>> {
        None
    }
}

/// Checks that `key` is non-empty and made of `[A-Za-z0-9._-]`.
///
/// Every backend accepts the same keys so a store can be swapped without
/// surprises. The restriction comes from [`FileStorage`], which uses the
/// key as a file name.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && key != "."
        && key != "..";
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
