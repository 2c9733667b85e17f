//! Gemini client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The API key was rejected.
    #[error("API key rejected by the Gemini API")]
    Unauthorized,

    /// The response carried no candidate text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Failed to encode a request or decode a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No API key is configured.
    #[error("Gemini is not configured: set AFCE_GEMINI__API_KEY or GEMINI_API_KEY")]
    NotConfigured,
}

impl From<serde_json::Error> for GeminiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
