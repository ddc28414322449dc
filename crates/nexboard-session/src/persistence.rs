//! The persistence bridge: where the logged-in identity is kept between runs.
//!
//! Two stores are involved:
//!
//! - **long-lived** (`durable`) — survives a restart. Holds the "remember
//!   me" flag, the account list, and the identity when the flag is on.
//! - **short-lived** (`ephemeral`) — dies with the tab. Holds the identity
//!   when the flag is off.
//!
//! At most one of the two holds an identity at any time. Every storage
//! failure is logged and swallowed here: the in-memory session is what
//! counts for the current process, and the worst case after a failed write
//! is having to log in again.

use nexboard_model::{Codec, Identity, JsonCodec};
use nexboard_storage::{SharedStorage, Storage, StorageEvent};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::keys;

/// Which session keys another handle changed since the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExternalChanges {
    /// The identity snapshot was written or removed.
    pub identity: bool,

    /// The "remember me" flag was written or removed.
    pub preference: bool,
}

impl ExternalChanges {
    /// Returns `true` if anything relevant changed.
    pub fn any(&self) -> bool {
        self.identity || self.preference
    }
}

/// Keeps the identity snapshot consistent with the "remember me" flag.
pub struct PersistenceBridge<C: Codec = JsonCodec> {
    durable: SharedStorage,
    ephemeral: SharedStorage,
    codec: C,

    /// Cached flag. Authoritative for this process even if writing it to
    /// `durable` fails.
    remember: bool,

    /// Used when no flag has been stored (or it can't be read).
    remember_by_default: bool,

    /// Changes made to `durable` by any handle, including our own.
    events: Option<broadcast::Receiver<StorageEvent>>,
}

impl PersistenceBridge<JsonCodec> {
    /// Creates a bridge that writes JSON snapshots.
    pub fn new(
        durable: SharedStorage,
        ephemeral: SharedStorage,
        remember_by_default: bool,
    ) -> Self {
        Self::with_codec(durable, ephemeral, remember_by_default, JsonCodec)
    }
}

impl<C: Codec> PersistenceBridge<C> {
    /// Creates a bridge with a specific codec and reads the stored flag.
    pub fn with_codec(
        durable: SharedStorage,
        ephemeral: SharedStorage,
        remember_by_default: bool,
        codec: C,
    ) -> Self {
        let events = durable.subscribe();
        let mut bridge = Self {
            durable,
            ephemeral,
            codec,
            remember: remember_by_default,
            remember_by_default,
            events,
        };
        bridge.reload_preference();
        bridge
    }

    /// The current "remember me" flag.
    pub fn remembers(&self) -> bool {
        self.remember
    }

    /// Re-reads the flag from long-lived storage.
    ///
    /// Missing, unreadable, or corrupt values fall back to the configured
    /// default.
    pub fn reload_preference(&mut self) {
        self.remember = match self.durable.get(keys::PERSISTENCE_PREFERENCE) {
            Ok(Some(bytes)) => match self.codec.decode::<bool>(&bytes) {
                Ok(remember) => remember,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        key = keys::PERSISTENCE_PREFERENCE,
                        "stored preference is corrupt, using default"
                    );
                    self.remember_by_default
                }
            },
            Ok(None) => self.remember_by_default,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = keys::PERSISTENCE_PREFERENCE,
                    "could not read preference, using default"
                );
                self.remember_by_default
            }
        };
    }

    /// Stores the flag. Turning it off removes the long-lived identity in
    /// the same call, so a crash right after can't resurrect it.
    pub fn set_preference(&mut self, remember: bool) {
        self.remember = remember;
        self.write(&*self.durable, keys::PERSISTENCE_PREFERENCE, &remember);
        if !remember {
            self.remove(&*self.durable, keys::IDENTITY);
        }
    }

    /// Reads the identity snapshot from the store the flag selects.
    ///
    /// Returns `None` when nothing is stored or the snapshot can't be
    /// read. A corrupt snapshot is removed so it isn't retried on every
    /// startup. This never fails: starting logged out is always safe.
    pub fn restore_on_startup(&self) -> Option<Identity> {
        let store = self.selected();
        let bytes = match store.get(keys::IDENTITY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = keys::IDENTITY,
                    "could not read identity snapshot"
                );
                return None;
            }
        };

        match self.codec.decode::<Identity>(&bytes) {
            Ok(identity) => {
                tracing::debug!(
                    username = %identity.username,
                    remember = self.remember,
                    "identity restored"
                );
                Some(identity)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = keys::IDENTITY,
                    "identity snapshot is corrupt, discarding"
                );
                self.remove(store, keys::IDENTITY);
                None
            }
        }
    }

    /// Writes the identity to the store the flag selects and removes any
    /// copy from the other one.
    pub fn persist(&self, identity: &Identity) {
        let (target, other) = if self.remember {
            (&*self.durable, &*self.ephemeral)
        } else {
            (&*self.ephemeral, &*self.durable)
        };
        self.write(target, keys::IDENTITY, identity);
        self.remove(other, keys::IDENTITY);
    }

    /// Removes the identity from both stores, whatever the flag says.
    pub fn purge_all(&self) {
        self.remove(&*self.durable, keys::IDENTITY);
        self.remove(&*self.ephemeral, keys::IDENTITY);
    }

    /// Removes the identity from short-lived storage only.
    pub fn purge_ephemeral(&self) {
        self.remove(&*self.ephemeral, keys::IDENTITY);
    }

    /// Drains pending change notifications and reports which session keys
    /// were changed by *other* handles on the long-lived store.
    ///
    /// If notifications were dropped because nobody drained them for a
    /// while, both keys are reported as changed.
    pub fn take_external_changes(&mut self) -> ExternalChanges {
        let own = self.durable.handle_id();
        let mut changes = ExternalChanges::default();
        let Some(events) = self.events.as_mut() else {
            return changes;
        };

        loop {
            match events.try_recv() {
                Ok(event) if event.origin == own => {}
                Ok(event) => match event.key.as_str() {
                    keys::IDENTITY => changes.identity = true,
                    keys::PERSISTENCE_PREFERENCE => changes.preference = true,
                    _ => {}
                },
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(
                        skipped,
                        "storage notifications dropped, assuming everything changed"
                    );
                    changes.identity = true;
                    changes.preference = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changes
    }

    fn selected(&self) -> &dyn Storage {
        if self.remember {
            &*self.durable
        } else {
            &*self.ephemeral
        }
    }

    fn write<T: Serialize>(&self, store: &dyn Storage, key: &str, value: &T) {
        let result = self
            .codec
            .encode(value)
            .map_err(|e| e.to_string())
            .and_then(|bytes| store.set(key, &bytes).map_err(|e| e.to_string()));
        if let Err(error) = result {
            tracing::warn!(%error, key, "storage write failed, continuing in memory");
        }
    }

    fn remove(&self, store: &dyn Storage, key: &str) {
        if let Err(e) = store.remove(key) {
            tracing::warn!(error = %e, key, "storage remove failed");
        }
    }
}
