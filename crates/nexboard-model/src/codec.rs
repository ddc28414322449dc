//! Codec trait and implementations for snapshot serialization.
//!
//! A "codec" (coder/decoder) converts between Rust values and raw bytes.
//! The session layer doesn't care HOW an identity snapshot is serialized;
//! it just needs something that implements [`Codec`]. This is the
//! "strategy pattern": one interface, swappable implementations.
//!
//! Currently we provide [`JsonCodec`]. JSON snapshots are what the
//! dashboard has always written, so stores created by older builds stay
//! readable.

use serde::{Serialize, de::DeserializeOwned};

use crate::ModelError;

/// A codec that can encode values to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → a codec can live inside a session manager that is
///   moved between threads.
/// - `'static` → the codec owns everything it needs.
///
/// `decode` uses `DeserializeOwned` (vs plain `Deserialize`) so the result
/// doesn't borrow from the input bytes. Storage hands us a fresh `Vec<u8>`
/// that is dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ModelError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ModelError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ModelError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ModelError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON snapshots are human-readable: you can open the storage directory
/// and see exactly who is remembered and which accounts were registered.
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use nexboard_model::{Codec, Identity, JsonCodec, Role};
///
/// let codec = JsonCodec;
/// let identity = Identity::new("admin", Role::Admin);
///
/// let bytes = codec.encode(&identity).unwrap();
/// assert_eq!(bytes, br#"{"username":"admin","role":"admin"}"#);
///
/// let decoded: Identity = codec.decode(&bytes).unwrap();
/// assert_eq!(identity, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(value).map_err(ModelError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ModelError> {
        serde_json::from_slice(data).map_err(ModelError::Decode)
    }
}
