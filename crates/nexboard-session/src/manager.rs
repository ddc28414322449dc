//! The session manager: the single owner of "who is logged in".
//!
//! Everything that changes the session goes through here, and every
//! change is mirrored to storage before the call returns:
//!
//! - `login` / `try_login` — authenticate and remember the identity
//! - `logout` — forget it everywhere
//! - `register` — add an account (never logs in)
//! - `set_persistence_preference` — flip "remember me"
//! - `sync_from_storage` — pick up logins/logouts made in other tabs
//!
//! # Ordering
//!
//! A `SessionManager` can only be built by [`SessionManager::restore`],
//! which reads the stored snapshot first. Anything that holds a manager
//! (the route guard included) therefore never sees the pre-restore
//! `Anonymous` state of a user who is actually remembered.

use std::sync::Arc;

use nexboard_model::{Codec, Identity, JsonCodec, Role};
use nexboard_storage::SharedStorage;

use crate::{
    Authenticator, CredentialStore, PersistenceBridge, RegistrationError, SessionConfig,
    SessionError, SessionState,
};

/// Owns the live session and keeps storage in step with it.
///
/// ## Lifecycle
///
/// ```text
/// restore() ──→ [Anonymous] ──login()──→ [Authenticated] ──logout()──→ [Anonymous]
///                                            │      ↑
///                                            └login()┘  (re-authentication)
/// ```
pub struct SessionManager<A: Authenticator = CredentialStore, C: Codec = JsonCodec> {
    state: SessionState,
    auth: A,
    bridge: PersistenceBridge<C>,
}

impl SessionManager<CredentialStore, JsonCodec> {
    /// Builds a manager over the bundled credential store.
    ///
    /// `durable` holds the accounts, the "remember me" flag, and remembered
    /// identities; `ephemeral` holds identities that should die with the tab.
    pub fn open(durable: SharedStorage, ephemeral: SharedStorage, config: &SessionConfig) -> Self {
        let credentials = CredentialStore::load(Arc::clone(&durable), config);
        let bridge = PersistenceBridge::new(durable, ephemeral, config.remember_by_default);
        Self::restore(credentials, bridge)
    }
}

impl<A: Authenticator, C: Codec> SessionManager<A, C> {
    /// Creates a manager and immediately restores any stored identity.
    pub fn restore(auth: A, bridge: PersistenceBridge<C>) -> Self {
        let state = SessionState::from_snapshot(bridge.restore_on_startup());
        tracing::info!(%state, remember = bridge.remembers(), "session restored");
        Self {
            state,
            auth,
            bridge,
        }
    }

    /// The current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The logged-in identity, if any.
    pub fn current_identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    /// Returns `true` if someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// The current "remember me" flag.
    pub fn persistence_preference(&self) -> bool {
        self.bridge.remembers()
    }

    /// The authenticator this manager checks logins against.
    pub fn authenticator(&self) -> &A {
        &self.auth
    }

    /// Logs in and returns whether it worked.
    ///
    /// See [`try_login`](Self::try_login) for the details.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.try_login(username, password).is_ok()
    }

    /// Logs in and returns a copy of the new identity.
    ///
    /// Logging in while someone is already logged in re-authenticates: on
    /// success the new identity replaces the old one (and its snapshot);
    /// on failure the existing session is left alone.
    ///
    /// # Errors
    /// [`SessionError::InvalidCredentials`] if the pair doesn't match.
    pub fn try_login(&mut self, username: &str, password: &str) -> Result<Identity, SessionError> {
        let identity = match self.auth.authenticate(username, password) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!(username, "login rejected");
                return Err(e);
            }
        };

        match &self.state {
            SessionState::Authenticated(previous) => tracing::info!(
                from = %previous.username,
                to = %identity.username,
                role = %identity.role,
                "re-authenticated, replacing session"
            ),
            SessionState::Anonymous => {
                tracing::info!(username = %identity.username, role = %identity.role, "logged in");
            }
        }

        self.bridge.persist(&identity);
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    /// The [`RegistrationError`] for the first rule that failed.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), RegistrationError> {
        self.auth.register(username, password, role).inspect_err(|e| {
            tracing::info!(username, error = %e, "registration refused");
        })
    }

    /// Logs out and removes every stored snapshot. Safe to call when
    /// nobody is logged in.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(identity) = &self.state {
            tracing::info!(username = %identity.username, "logged out");
        }
        self.state = SessionState::Anonymous;
        self.bridge.purge_all();
    }

    /// Sets "remember me".
    ///
    /// Turning it off removes the long-lived snapshot right away. If
    /// someone is logged in, their identity is moved to the store the new
    /// value selects; they stay logged in either way.
    pub fn set_persistence_preference(&mut self, remember: bool) {
        let changed = remember != self.bridge.remembers();
        self.bridge.set_preference(remember);
        if let SessionState::Authenticated(identity) = &self.state {
            self.bridge.persist(identity);
        }
        if changed {
            tracing::info!(remember, "persistence preference changed");
        }
    }

    /// Adopts logins, logouts, and preference changes other handles made
    /// to long-lived storage since the last call.
    ///
    /// Returns `true` if the session state changed.
    pub fn sync_from_storage(&mut self) -> bool {
        let changes = self.bridge.take_external_changes();
        if !changes.any() {
            return false;
        }

        if changes.preference {
            self.bridge.reload_preference();
            // Another tab flipping the flag must not log this one out: move
            // our identity to the store the new flag selects. When turning
            // it on, an identity already in long-lived storage wins.
            if let SessionState::Authenticated(identity) = &self.state {
                if !self.bridge.remembers() || self.bridge.restore_on_startup().is_none() {
                    self.bridge.persist(identity);
                } else {
                    self.bridge.purge_ephemeral();
                }
            }
        }

        let next = SessionState::from_snapshot(self.bridge.restore_on_startup());
        if next == SessionState::Anonymous {
            // Nothing left here may bring the old session back later.
            self.bridge.purge_ephemeral();
        }
        if next == self.state {
            return false;
        }

        tracing::info!(from = %self.state, to = %next, "session changed in another tab");
        self.state = next;
        true
    }
}

impl<A: Authenticator + std::fmt::Debug, C: Codec> std::fmt::Debug for SessionManager<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .field("remember", &self.bridge.remembers())
            .field("auth", &self.auth)
            .finish()
    }
}
