//! Shared error types

/// Errors raised by the core crate
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
