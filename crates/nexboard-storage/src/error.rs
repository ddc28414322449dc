/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing, or removing the value behind `key` failed.
    #[error("storage i/o failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters a backend can't represent.
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The store can't be used at all (poisoned lock, missing directory).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
