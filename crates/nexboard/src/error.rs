//! Unified error type for NexBoard.

use nexboard_model::ModelError;
use nexboard_router::RouterError;
use nexboard_session::{RegistrationError, SessionError};
use nexboard_storage::StorageError;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors, so callers
/// of the `nexboard` crate only ever match on this one type.
#[derive(Debug, thiserror::Error)]
pub enum NexboardError {
    /// Encoding or decoding a stored value failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The storage backend could not be opened or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Login failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A sign-up was refused.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A custom route table was malformed.
    #[error(transparent)]
    Router(#[from] RouterError),
}
