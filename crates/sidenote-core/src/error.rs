//! Error types for sidenote-core

use thiserror::Error;

/// Result type alias using sidenote-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sidenote-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
