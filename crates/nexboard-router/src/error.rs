//! Error types for the router.

/// Errors that can occur while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Route paths must be absolute and must not carry a query or fragment.
    #[error("invalid route path '{0}'")]
    InvalidPath(String),

    /// Two routes were registered for the same path.
    #[error("route '{0}' is already registered")]
    DuplicatePath(String),
}
