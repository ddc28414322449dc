//! Test doubles shared by the unit tests in this crate.

use nexboard_storage::{HandleId, Storage, StorageError};

/// A store whose every operation fails, for exercising the
/// "log and carry on" paths.
pub(crate) struct FailingStorage {
    id: HandleId,
}

impl FailingStorage {
    pub(crate) fn new() -> Self {
        Self {
            id: HandleId::new(0xdead),
        }
    }

    fn fail(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::other("disk on fire"),
        }
    }
}

impl Storage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(Self::fail(key))
    }

    fn set(&self, key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(Self::fail(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(Self::fail(key))
    }

    fn handle_id(&self) -> HandleId {
        self.id
    }
}
