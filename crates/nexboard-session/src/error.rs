//! Error types for the session layer.
//!
//! Storage failures are deliberately absent: the persistence bridge and the
//! credential store log and swallow them, because the in-memory session
//! stays authoritative for the lifetime of the process.

/// Reasons a registration attempt is refused.
///
/// Each variant maps to one form field, so a caller can put the message
/// next to the input that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Another account already uses this username.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// The username is shorter than the configured minimum.
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },

    /// The password is shorter than the configured minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Errors that can occur during session management.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The username/password pair didn't match any account.
    ///
    /// Deliberately doesn't say whether the username exists, so the login
    /// form can't be used to enumerate accounts.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Registration was refused.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}
