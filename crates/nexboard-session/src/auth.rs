//! Authentication hook for validating logins and accepting new accounts.
//!
//! The session manager doesn't know where accounts live. It talks to an
//! [`Authenticator`]: the bundled [`CredentialStore`](crate::CredentialStore)
//! in the dashboard, a stub in tests, or something backed by a real
//! identity provider later, all without touching the state machine.

use nexboard_model::{Identity, Role};

use crate::{RegistrationError, SessionError};

/// Validates login attempts and registers new accounts.
///
/// # Example
///
/// ```rust
/// use nexboard_model::{Identity, Role};
/// use nexboard_session::{Authenticator, RegistrationError, SessionError};
///
/// /// Lets exactly one hard-coded operator in and refuses sign-ups.
/// struct OperatorOnly;
///
/// impl Authenticator for OperatorOnly {
///     fn authenticate(&self, username: &str, password: &str) -> Result<Identity, SessionError> {
///         if username == "ops" && password == "letmein!" {
///             Ok(Identity::new("ops", Role::Admin))
///         } else {
///             Err(SessionError::InvalidCredentials)
///         }
///     }
///
///     fn register(&mut self, username: &str, _: &str, _: Role) -> Result<(), RegistrationError> {
///         Err(RegistrationError::DuplicateUsername(username.to_string()))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Checks a username/password pair and returns the identity it grants.
    ///
    /// # Errors
    /// [`SessionError::InvalidCredentials`] on any mismatch. Implementations
    /// must not reveal which of the two fields was wrong.
    fn authenticate(&self, username: &str, password: &str) -> Result<Identity, SessionError>;

    /// Validates and stores a new account.
    ///
    /// # Errors
    /// The [`RegistrationError`] describing the first rule that failed.
    fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), RegistrationError>;
}
