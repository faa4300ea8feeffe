//! Error types for tabtrace

use thiserror::Error;

/// Errors that can occur at the engine's ingestion and encoding boundary.
///
/// Aggregations themselves are total functions and never produce these; only
/// parsing, validation, and serialization can fail.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse event payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Event rejected: {0}")]
    InvalidEvent(#[from] crate::schema::ValidationError),

    #[error("Settings rejected: {0}")]
    InvalidSettings(#[from] crate::settings::SettingsError),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
