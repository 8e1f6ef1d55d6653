//! Error types for Tinker.

use thiserror::Error;

/// Top-level error type for host-side Tinker operations.
#[derive(Debug, Error)]
pub enum TinkerError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Data that parsed but failed validation
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for Tinker operations.
pub type TinkerResult<T> = Result<T, TinkerError>;
