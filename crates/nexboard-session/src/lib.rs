//! Login session management for NexBoard.
//!
//! This crate owns the answer to "who is logged in":
//!
//! 1. **Credentials** — checking a username/password and accepting new
//!    accounts ([`Authenticator`] trait, [`CredentialStore`])
//! 2. **Session tracking** — the `Anonymous` / `Authenticated` state
//!    machine ([`SessionManager`])
//! 3. **Persistence** — keeping the identity in short-lived or long-lived
//!    storage depending on "remember me" ([`PersistenceBridge`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)         ← asks the session who is logged in on every navigation
//!     ↕
//! Session (this crate)   ← owns the live identity and its transitions
//!     ↕
//! Storage + Model (below) ← key/value bytes and the Identity ↔ bytes codec
//! ```

mod auth;
mod credentials;
mod error;
pub mod keys;
mod manager;
mod persistence;
mod session;

pub use auth::Authenticator;
pub use credentials::CredentialStore;
pub use error::{RegistrationError, SessionError};
pub use manager::SessionManager;
pub use persistence::{ExternalChanges, PersistenceBridge};
pub use session::{SessionConfig, SessionState};

#[cfg(test)]
mod testing;
