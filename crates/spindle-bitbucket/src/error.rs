//! Bitbucket client error types.

use spindle_core::HostError;
use thiserror::Error;

/// Errors that can occur when talking to the Bitbucket REST API.
#[derive(Debug, Error)]
pub enum BitbucketError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested object does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rejected the request payload (HTTP 400).
    #[error("rejected by Bitbucket: {0}")]
    Rejected(String),

    /// The API returned another non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<BitbucketError> for HostError {
    fn from(error: BitbucketError) -> Self {
        match error {
            BitbucketError::Http(e) if e.is_decode() => Self::Parse(e.to_string()),
            BitbucketError::Http(e) => Self::Transport(e.to_string()),
            BitbucketError::NotFound(what) => Self::NotFound(what),
            BitbucketError::Rejected(message) => Self::Validation(message),
            BitbucketError::Api { status, message } => Self::Api { status, message },
            BitbucketError::Parse(message) => Self::Parse(message),
            BitbucketError::RateLimited { retry_after_secs } => {
                Self::RateLimited { retry_after_secs }
            }
        }
    }
}
