//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Domain and storage errors are folded into this type at the binary
/// boundary so every failure maps to one stable code and exit status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Status change not allowed from the current state.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Persisted data could not be decoded.
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for command output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::StorageCorrupt(_) => "STORAGE_CORRUPT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the process exit status for this error.
    ///
    /// Follows the BSD `sysexits` numbering.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 65,
            Self::NotFound(_) => 66,
            Self::InvalidTransition(_) => 67,
            Self::StorageCorrupt(_) => 74,
            Self::Storage(_) | Self::Internal(_) => 70,
            Self::Configuration(_) => 78,
        }
    }
}
