//! Error types shared across the protax workspace

use thiserror::Error;

/// Result type alias for protax operations
pub type Result<T> = std::result::Result<T, ProtaxError>;

/// Main error type for shared protax concerns
#[derive(Error, Debug)]
pub enum ProtaxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProtaxError {
    /// Create a logging setup error
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
