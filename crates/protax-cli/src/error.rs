//! Error types for the protax CLI
//!
//! This module provides user-friendly error types with clear, actionable
//! messages that help users understand what went wrong and how to fix it.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
///
/// Per-identifier lookup failures never surface through this type; the
/// resolver loop degrades them to sentinel rows and keeps going. These errors
/// cover the fatal cases: unusable input, unwritable output, broken setup.
#[derive(Error, Debug)]
pub enum CliError {
    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Input table lacks a required column
    #[error("Column '{0}' not found in the input table. The input must be tab-separated with a header row.")]
    MissingColumn(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and the service URL.")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TSV reading or writing failed
    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// Error from the shared protax-common layer
    #[error(transparent)]
    Common(#[from] protax_common::ProtaxError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
