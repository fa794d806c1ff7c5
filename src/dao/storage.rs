use std::error::Error;
use thiserror::Error;

/// Result alias for record store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by record store backends regardless of the underlying store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or failed mid-operation. Callers may
    /// retry; a failed award commit leaves no partial effect behind.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable description of the failure.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The store contents violate an invariant the caller relies on, e.g. a
    /// score increment for a user that has no score row.
    #[error("storage inconsistent: {0}")]
    Inconsistent(String),
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
