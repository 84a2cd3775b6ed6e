//! Cross-cutting error types for Vigil.
//!
//! Transport-level errors (`ClassifierError`, `StoreError`) live in their
//! respective crates and convert into [`TriageError`] where they cross into
//! the triage pipeline. A unified error is deferred to `vigil-cli`.

use thiserror::Error;

/// Errors raised by the triage pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// Caller-supplied text or labels are malformed. Never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classification collaborator failed for one aspect (network,
    /// timeout, or malformed response).
    #[error("classification unavailable for aspect '{aspect_id}': {reason}")]
    ClassificationUnavailable { aspect_id: String, reason: String },

    /// An aspect id was looked up that the registry does not declare.
    #[error("unknown aspect: {0}")]
    UnknownAspect(String),
}

impl TriageError {
    /// Whether this error is recovered locally into an "unavailable" aspect.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ClassificationUnavailable { .. })
    }
}
