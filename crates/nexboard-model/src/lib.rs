//! Shared data model for NexBoard.
//!
//! This crate defines the values every other layer passes around:
//!
//! - **Types** ([`Identity`], [`Role`], [`CredentialRecord`]) — who a user
//!   is and how they prove it.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those values are
//!   turned into the bytes that sit in storage.
//! - **Errors** ([`ModelError`]) — what can go wrong while encoding,
//!   decoding, or parsing them.
//!
//! # Architecture
//!
//! The model layer has no idea where bytes end up. It sits below storage
//! and the session layer:
//!
//! ```text
//! Session (who is logged in) → Model (Identity ↔ bytes) → Storage (key/value)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ModelError;
pub use types::{CredentialRecord, Identity, Role};
