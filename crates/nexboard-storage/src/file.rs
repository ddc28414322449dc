//! File-backed [`Storage`] implementation.
//!
//! Each key lives in its own file inside the storage directory. Writes go
//! to a temp file first and are renamed into place, so a crash mid-write
//! leaves either the old value or the new one, never half of each.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{EVENT_CAPACITY, HandleId, Storage, StorageError, StorageEvent, validate_key};

/// A [`Storage`] that keeps one file per key under a directory.
///
/// Change notifications only reach handles opened from the same
/// `FileStorage` (via [`handle`](Self::handle)) inside this process.
#[derive(Debug, Clone)]
pub struct FileStorage {
    id: HandleId,
    dir: Arc<PathBuf>,
    events: broadcast::Sender<StorageEvent>,
}

impl FileStorage {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Unavailable(format!("cannot create {}: {e}", dir.display()))
        })?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        tracing::debug!(dir = %dir.display(), "file store opened");
        Ok(Self {
            id: HandleId::random(),
            dir: Arc::new(dir),
            events,
        })
    }

    /// Opens another handle onto the same directory and event channel.
    pub fn handle(&self) -> Self {
        Self {
            id: HandleId::random(),
            dir: Arc::clone(&self.dir),
            events: self.events.clone(),
        }
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn publish(&self, key: &str) {
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            origin: self.id,
        });
    }

    fn write_temp(path: &Path, value: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(value)?;
        file.sync_all()
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        let final_path = self.path_for(key);
        let temp_path = self
            .dir
            .join(format!("{key}.tmp.{}.{:x}", std::process::id(), self.id.into_inner()));

        // Whatever fails, the temp file must not outlive this call.
        let written =
            Self::write_temp(&temp_path, value).and_then(|()| fs::rename(&temp_path, &final_path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(Self::io_error(key, e));
        }

        tracing::trace!(key, handle = %self.id, "file store write");
        self.publish(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                tracing::trace!(key, handle = %self.id, "file store remove");
                self.publish(key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn handle_id(&self) -> HandleId {
        self.id
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StorageEvent>> {
        Some(self.events.subscribe())
    }
}
