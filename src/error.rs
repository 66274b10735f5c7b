//! Error types for uxsense

use thiserror::Error;

/// Errors that can occur at the parse/config/storage boundaries.
///
/// Detector operations never return errors: malformed or absent target
/// information degrades to the lowest-confidence classification instead of
/// failing the host page's event loop.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to parse interaction events: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Failure reported by a session storage collaborator (quota exceeded,
/// storage disabled, private mode). Always swallowed by `SessionContext`;
/// the in-memory session stays authoritative.
#[derive(Debug, Error)]
#[error("session storage unavailable: {0}")]
pub struct StorageError(pub String);
