//! Error types for postbox-core

use thiserror::Error;

/// Result type alias using postbox-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in postbox-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Post not found
    #[error("Post not found: {0}")]
    NotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network/transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote API returned a non-success response
    #[error("Remote API error: {0}")]
    Api(String),
}

impl Error {
    /// True for the expected "record does not exist" outcome, as opposed
    /// to a systemic storage or network failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
