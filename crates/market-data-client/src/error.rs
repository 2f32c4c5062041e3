//! Error types for the market data client.

use thiserror::Error;


/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Upstream returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from upstream.
        message: String,
    },

    /// Symbol or chain not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream payload did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
