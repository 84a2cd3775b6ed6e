//! Classifier error types.

use std::time::Duration;

use thiserror::Error;
use vigil_core::TriageError;

/// Why a classification call produced no usable answer.
#[derive(Debug, Error)]
pub enum UnavailableReason {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call did not finish within the configured timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The response body is missing labels/scores or is inconsistent.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Errors returned by [`crate::ClassifierClient::classify`].
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Text or candidate labels are unusable. Raised before any request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The outbound call failed; carries the aspect it was made for.
    #[error("classification unavailable for aspect '{aspect_id}': {reason}")]
    Unavailable {
        aspect_id: String,
        #[source]
        reason: UnavailableReason,
    },
}

impl ClassifierError {
    #[must_use]
    pub fn aspect_id(&self) -> Option<&str> {
        match self {
            Self::InvalidInput(_) => None,
            Self::Unavailable { aspect_id, .. } => Some(aspect_id),
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Unavailable {
                reason: UnavailableReason::Timeout(_),
                ..
            }
        )
    }
}

impl From<ClassifierError> for TriageError {
    fn from(error: ClassifierError) -> Self {
        match error {
            ClassifierError::InvalidInput(message) => Self::InvalidInput(message),
            ClassifierError::Unavailable { aspect_id, reason } => Self::ClassificationUnavailable {
                aspect_id,
                reason: reason.to_string(),
            },
        }
    }
}
