//! Error types for the model layer.
//!
//! Each crate in NexBoard defines its own error enum. When you see a
//! `ModelError`, the problem is in turning a value into bytes (or back),
//! not in the store that holds those bytes.

/// Errors that can occur in the model layer.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: a snapshot written by hand, a truncated file, or a
    /// role string this version doesn't know.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A value parsed from text doesn't name anything we recognize,
    /// e.g. `"superuser".parse::<Role>()`.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
