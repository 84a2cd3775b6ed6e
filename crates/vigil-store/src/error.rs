//! Store error types.

use thiserror::Error;

/// Errors that can occur when reading from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The store returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a store response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record key was empty.
    #[error("invalid record key: {0:?}")]
    InvalidKey(String),

    /// No database URL configured.
    #[error("document store is not configured (set store.database_url)")]
    NotConfigured,
}
