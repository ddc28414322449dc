//! Core model types: who a user is and how they log in.
//!
//! [`Identity`] is the authenticated principal the rest of the dashboard
//! sees. [`CredentialRecord`] is what the credential store keeps to decide
//! whether a login attempt produces one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The two access levels the dashboard knows about.
///
/// `#[serde(rename_all = "lowercase")]` keeps snapshots readable and
/// compatible with what the dashboard has always stored: `"admin"` and
/// `"user"`, not `"Admin"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including system settings.
    Admin,

    /// Regular account. The registration form's default choice.
    #[default]
    User,
}

impl Role {
    /// Returns the stable lowercase name used in snapshots and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the lowercase names produced by [`Role::as_str`].
///
/// Matching is exact: `"Admin"` is rejected just like `"root"`.
impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(ModelError::InvalidValue(format!("unknown role '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated principal: a username and the role it was granted.
///
/// Created on a successful login, held for as long as the session lasts,
/// and dropped on logout. This is also exactly what gets written to
/// storage as the identity snapshot. Passwords never travel with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Unique, case-sensitive account name.
    pub username: String,

    /// Access level used by the route guard.
    pub role: Role,
}

impl Identity {
    /// Creates an identity from any string-like username.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Returns `true` if this identity holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}

// ---------------------------------------------------------------------------
// CredentialRecord
// ---------------------------------------------------------------------------

/// A registered account: username, password, and role.
///
/// Passwords are stored and compared in plaintext. That is only acceptable
/// because NexBoard is a demo with no backend; a real deployment must hash
/// and salt them. To keep the plaintext out of logs, `Debug` is written by
/// hand and redacts the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Unique key of the record.
    pub username: String,

    /// Plaintext password (demo only).
    pub password: String,

    /// Role granted on successful login.
    pub role: Role,
}

impl CredentialRecord {
    /// Creates a record from any string-like username and password.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// Returns `true` if both fields match exactly (case-sensitive).
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// The identity a successful login with this record produces.
    pub fn identity(&self) -> Identity {
        Identity::new(self.username.clone(), self.role)
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
