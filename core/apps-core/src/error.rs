//! Error types for mac-apps-core operations.
//!
//! Fetch errors never escape the pipeline: fetchers log them and degrade to
//! an empty collection. Only selector and encode errors reach the caller.

use std::path::PathBuf;

/// All errors that can occur in mac-apps-core operations.
#[derive(Debug, thiserror::Error)]
pub enum AppsError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Fetch Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command execution failed: {command}: {details}")]
    CommandFailed { command: String, details: String },

    #[error("Command timed out after {timeout_ms}ms: {command}")]
    CommandTimedOut { command: String, timeout_ms: u64 },

    // ─────────────────────────────────────────────────────────────────────
    // Presentation Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid selector '{0}': value can be either: all, inactive, idle, active")]
    InvalidSelector(String),

    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Convenience type alias for Results using AppsError.
pub type Result<T> = std::result::Result<T, AppsError>;
