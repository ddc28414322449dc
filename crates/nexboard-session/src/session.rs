//! Session types: configuration and the login state machine.

use nexboard_model::{CredentialRecord, Identity, Role};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Create one with `SessionConfig::default()` and override just the fields
/// you care about with struct update syntax:
///
/// ```rust
/// use nexboard_session::SessionConfig;
///
/// let config = SessionConfig {
///     remember_by_default: false,
///     ..SessionConfig::default()
/// };
/// assert_eq!(config.min_password_len, 6);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The "remember me" value used until the user sets one.
    ///
    /// Default: `true`. The dashboard has always kept logins across
    /// restarts, so that stays the out-of-the-box behavior.
    pub remember_by_default: bool,

    /// Shortest username registration accepts. Default: 3.
    pub min_username_len: usize,

    /// Shortest password registration accepts. Default: 6.
    pub min_password_len: usize,

    /// Accounts that always exist, even with empty storage.
    pub seed_credentials: Vec<CredentialRecord>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remember_by_default: true,
            min_username_len: 3,
            min_password_len: 6,
            seed_credentials: vec![
                CredentialRecord::new("admin", "admin123", Role::Admin),
                CredentialRecord::new("user", "user123", Role::User),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Who is logged in right now.
///
/// ```text
///   Anonymous ──(login)──→ Authenticated ──(login as someone else)──┐
///       ↑                       │    ↑                              │
///       └───────(logout)────────┘    └──────────────────────────────┘
/// ```
///
/// Registration never moves between states; a new account has to log in
/// like any other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nobody is logged in.
    #[default]
    Anonymous,

    /// A user is logged in with this identity.
    Authenticated(Identity),
}

impl SessionState {
    /// Builds the state a restored snapshot (or its absence) implies.
    pub fn from_snapshot(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Anonymous, Self::Authenticated)
    }

    /// The logged-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    /// Returns `true` if someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::Authenticated(identity) => write!(f, "Authenticated({identity})"),
        }
    }
}
