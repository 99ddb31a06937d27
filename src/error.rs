//! Error types for credgate
//!
//! Store failures are errors; authentication rejections are not. A rejected
//! login is a normal outcome carried by [`crate::auth::AuthResult`], so the
//! taxonomy here only covers the medium and configuration.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Backing medium unreachable or unreadable (connection refused,
    /// missing parent directory, malformed records). Not retried; the
    /// caller must not proceed to authentication.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Invalid configuration
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Config field name
        field: String,
        /// Detailed message
        message: String,
    },

    /// Internal error (serialization, lock poisoning)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::StoreUnavailable(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::StoreUnavailable(e.to_string())
    }
}
