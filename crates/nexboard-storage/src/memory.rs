//! In-process [`Storage`] backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use crate::{EVENT_CAPACITY, HandleId, Storage, StorageError, StorageEvent, validate_key};

struct Shared {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    events: broadcast::Sender<StorageEvent>,
}

/// A [`Storage`] backed by a `HashMap` behind a mutex.
///
/// `MemoryStorage::new()` creates an empty store. [`handle`](Self::handle)
/// opens another handle onto the same entries with its own [`HandleId`],
/// which is how tests model a second tab or a restarted process sharing
/// long-lived storage. `clone()` keeps the handle id (same tab).
#[derive(Clone)]
pub struct MemoryStorage {
    id: HandleId,
    shared: Arc<Shared>,
}

impl MemoryStorage {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id: HandleId::random(),
            shared: Arc::new(Shared {
                entries: Mutex::new(HashMap::new()),
                events,
            }),
        }
    }

    /// Opens another handle onto the same entries.
    pub fn handle(&self) -> Self {
        Self {
            id: HandleId::random(),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, StorageError> {
        self.shared
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }

    fn publish(&self, key: &str) {
        // No subscribers is the common case; nothing to do then.
        let _ = self.shared.events.send(StorageEvent {
            key: key.to_string(),
            origin: self.id,
        });
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("id", &self.id)
            .field("len", &self.len())
            .finish()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries()?.insert(key.to_string(), value.to_vec());
        tracing::trace!(key, handle = %self.id, "memory store write");
        self.publish(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let removed = self.entries()?.remove(key).is_some();
        if removed {
            tracing::trace!(key, handle = %self.id, "memory store remove");
            self.publish(key);
        }
        Ok(())
    }

    fn handle_id(&self) -> HandleId {
        self.id
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StorageEvent>> {
        Some(self.shared.events.subscribe())
    }
}
