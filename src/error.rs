//! Error types for the service.

use thiserror::Error;

/// Result type alias for server and store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside of form validation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
