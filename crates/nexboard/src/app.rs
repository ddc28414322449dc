//! `NexboardApp` builder and the facade the dashboard front end talks to.
//!
//! This ties the layers together: storage → session → router. A front end
//! builds one `NexboardApp` at startup, then calls into it on every login
//! form submit, logout click, and navigation.

use std::path::PathBuf;
use std::sync::Arc;

use nexboard_model::{Identity, Role};
use nexboard_router::{NavItem, RouteDecision, RouteGuard, RouteTable};
use nexboard_session::{SessionConfig, SessionManager};
use nexboard_storage::{FileStorage, MemoryStorage, SharedStorage};

use crate::NexboardError;

/// Startup settings for a [`NexboardApp`].
#[derive(Debug, Clone, Default)]
pub struct NexboardConfig {
    /// Session behavior (remember-me default, validation, seed accounts).
    pub session: SessionConfig,

    /// Directory for long-lived storage. `None` keeps everything in memory,
    /// so nothing survives the process.
    pub storage_dir: Option<PathBuf>,
}

/// Builder for configuring and starting a [`NexboardApp`].
///
/// # Example
///
/// ```rust,no_run
/// use nexboard::prelude::*;
///
/// let app = NexboardApp::builder()
///     .storage_dir("/var/lib/nexboard")
///     .session_config(SessionConfig {
///         remember_by_default: false,
///         ..SessionConfig::default()
///     })
///     .build()?;
/// # Ok::<(), NexboardError>(())
/// ```
pub struct NexboardAppBuilder {
    config: NexboardConfig,
    durable: Option<SharedStorage>,
    ephemeral: Option<SharedStorage>,
    routes: RouteTable,
}

impl NexboardAppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: NexboardConfig::default(),
            durable: None,
            ephemeral: None,
            routes: RouteTable::dashboard(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: NexboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Keeps long-lived state in files under `dir`.
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.storage_dir = Some(dir.into());
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// Uses `storage` for long-lived state. Takes precedence over
    /// [`storage_dir`](Self::storage_dir).
    pub fn durable_storage(mut self, storage: SharedStorage) -> Self {
        self.durable = Some(storage);
        self
    }

    /// Uses `storage` for per-tab state instead of a fresh in-memory map.
    pub fn ephemeral_storage(mut self, storage: SharedStorage) -> Self {
        self.ephemeral = Some(storage);
        self
    }

    /// Uses a custom route table instead of the dashboard's.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Opens storage and restores the stored session.
    ///
    /// # Errors
    /// [`NexboardError::Storage`] if the storage directory can't be created.
    pub fn build(self) -> Result<NexboardApp, NexboardError> {
        let durable: SharedStorage = match (self.durable, &self.config.storage_dir) {
            (Some(storage), _) => storage,
            (None, Some(dir)) => Arc::new(FileStorage::open(dir.clone())?),
            (None, None) => Arc::new(MemoryStorage::new()),
        };
        let ephemeral = self
            .ephemeral
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));

        let session = SessionManager::open(durable, ephemeral, &self.config.session);
        tracing::info!(
            storage_dir = ?self.config.storage_dir,
            routes = self.routes.routes().len(),
            "NexBoard ready"
        );

        Ok(NexboardApp {
            session,
            guard: RouteGuard::new(self.routes),
        })
    }
}

impl Default for NexboardAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running dashboard session with its route guard.
///
/// The session has already been restored when this exists, so the first
/// [`navigate`](Self::navigate) sees a remembered user as logged in.
#[derive(Debug)]
pub struct NexboardApp {
    session: SessionManager,
    guard: RouteGuard,
}

impl NexboardApp {
    /// Creates a new builder.
    pub fn builder() -> NexboardAppBuilder {
        NexboardAppBuilder::new()
    }

    /// The underlying session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Mutable access to the session manager.
    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    /// The route guard navigations are checked against.
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// The logged-in identity, if any.
    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current_identity()
    }

    /// Logs in.
    ///
    /// # Errors
    /// [`NexboardError::Session`] if the username/password pair is wrong.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Identity, NexboardError> {
        Ok(self.session.try_login(username, password)?)
    }

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    /// [`NexboardError::Registration`] with the first rule that failed.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), NexboardError> {
        Ok(self.session.register(username, password, role)?)
    }

    /// Logs out everywhere this session was stored.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The current "remember me" flag.
    pub fn persistence_preference(&self) -> bool {
        self.session.persistence_preference()
    }

    /// Sets "remember me".
    pub fn set_persistence_preference(&mut self, remember: bool) {
        self.session.set_persistence_preference(remember);
    }

    /// Decides what a navigation to `path` shows.
    pub fn navigate(&self, path: &str) -> RouteDecision {
        self.guard.check(&self.session, path)
    }

    /// Sidebar entries for whoever is logged in.
    pub fn visible_menu(&self) -> Vec<NavItem<'_>> {
        self.guard.visible_menu(self.session.current_identity())
    }

    /// Picks up logins and logouts made through other handles on the same
    /// long-lived store. Returns `true` if the session changed.
    pub fn sync(&mut self) -> bool {
        self.session.sync_from_storage()
    }
}

#[cfg(test)]
mod tests {
    use nexboard_router::{Page, Route};

    use super::*;

    #[test]
    fn test_build_defaults_in_memory_anonymous() {
        let app = NexboardApp::builder().build().unwrap();

        assert!(app.current_identity().is_none());
        assert!(app.persistence_preference());
        assert_eq!(app.navigate("/dashboard"), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn test_login_wrong_password_is_session_error() {
        let mut app = NexboardApp::builder().build().unwrap();

        let err = app.login("admin", "nope").unwrap_err();

        assert!(matches!(err, NexboardError::Session(_)));
    }

    #[test]
    fn test_register_too_short_is_registration_error() {
        let mut app = NexboardApp::builder().build().unwrap();

        let err = app.register("ab", "123456", Role::User).unwrap_err();

        assert!(matches!(err, NexboardError::Registration(_)));
    }

    #[test]
    fn test_custom_routes_are_enforced() {
        let routes = RouteTable::dashboard()
            .with_route(Route::restricted("/audit", Page::Settings, Role::Admin))
            .unwrap();
        let mut app = NexboardApp::builder().routes(routes).build().unwrap();

        app.login("user", "user123").unwrap();

        assert_eq!(app.navigate("/audit"), RouteDecision::Unauthorized);
    }

    #[test]
    fn test_session_config_applied() {
        let mut app = NexboardApp::builder()
            .session_config(SessionConfig {
                min_password_len: 10,
                ..SessionConfig::default()
            })
            .build()
            .unwrap();

        assert!(app.register("newuser", "123456", Role::User).is_err());
        assert!(app.register("newuser", "1234567890", Role::User).is_ok());
    }
}
