//! Error types for the akhada_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for akhada_core operations
///
/// Readiness derivation itself never fails; every variant here comes from
/// the storage, configuration or export shell around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store error (bad key, unusable directory)
    #[error("Store error: {0}")]
    Store(String),

    /// Tracker operation error (unknown exercise, inactive session)
    #[error("Tracker error: {0}")]
    Tracker(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
