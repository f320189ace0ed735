//! Logger errors

use thiserror::Error;

/// Result type for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while setting up logging
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Filter directives could not be parsed
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("failed to initialize logger: {0}")]
    Init(String),
}
