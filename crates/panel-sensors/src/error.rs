//! Error types for custom data sources.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, SensorError>;

/// Errors that can occur while fetching a sensor value.
#[derive(Error, Debug)]
pub enum SensorError {
    /// A data file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON document parsed but lacks the requested field.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The results file is empty.
    #[error("No results available yet")]
    NoResults,

    /// HTTP request failed, timed out or returned an error status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No proxy URL is configured.
    #[error("No proxy configured")]
    MissingProxy,

    /// Unknown data source name.
    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be written.
    #[error("Failed to write configuration {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
