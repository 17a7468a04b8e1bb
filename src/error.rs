//! Error types for the shot chart pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("unexpected payload from {endpoint}: {reason}")]
    Payload {
        endpoint: &'static str,
        reason: String,
    },

    #[error("shot chart result set is missing column {0}")]
    MissingColumn(&'static str),

    #[error("malformed shot row {row}: {reason}")]
    MalformedShot { row: usize, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to save chart to {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
