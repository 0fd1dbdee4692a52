//! Error types for movie_finder.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("OMDb request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode poster: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
