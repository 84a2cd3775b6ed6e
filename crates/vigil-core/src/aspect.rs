//! Aspect definitions and per-aspect classification results.
//!
//! An aspect is one independent zero-shot question asked of a report
//! description ("what is the severity?"). Each aspect declares its candidate
//! labels in a fixed order; that order is the tie-break for equal scores.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::TriageError;

/// Top label used when the classifier returned an empty (degenerate) answer.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Top label used when an aspect's classification failed.
pub const UNAVAILABLE_LABEL: &str = "unavailable";

/// One aspect the registry evaluates for every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AspectDefinition {
    /// Unique identifier (e.g. `sentiment`, `crime_category`).
    pub aspect_id: String,
    /// Human-facing name used in summaries (e.g. `Crime Type`).
    pub display_name: String,
    /// Candidate labels in declaration order.
    pub candidate_labels: Vec<String>,
    /// Whether summaries print the top score as a percentage.
    #[serde(default)]
    pub show_score: bool,
}

impl AspectDefinition {
    /// Build a definition, checking that it can be asked as a zero-shot query.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if the id is blank, or if fewer
    /// than two distinct, non-blank candidate labels are given.
    pub fn new(
        aspect_id: impl Into<String>,
        display_name: impl Into<String>,
        candidate_labels: &[&str],
        show_score: bool,
    ) -> Result<Self, TriageError> {
        let definition = Self {
            aspect_id: aspect_id.into(),
            display_name: display_name.into(),
            candidate_labels: candidate_labels.iter().map(|l| (*l).to_string()).collect(),
            show_score,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Check the zero-shot preconditions on an already-built definition.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] on a blank id, a blank label,
    /// duplicate labels, or fewer than two labels.
    pub fn validate(&self) -> Result<(), TriageError> {
        if self.aspect_id.trim().is_empty() {
            return Err(TriageError::InvalidInput("aspect id must not be blank".into()));
        }
        validate_candidate_labels(&self.candidate_labels)
    }

    /// Position of `label` in the declared candidate order.
    #[must_use]
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.candidate_labels.iter().position(|l| l == label)
    }
}

/// Check that a candidate label set supports a zero-shot query.
///
/// # Errors
///
/// Returns [`TriageError::InvalidInput`] on a blank label, duplicate labels, or
/// fewer than two labels.
pub fn validate_candidate_labels<S: AsRef<str>>(labels: &[S]) -> Result<(), TriageError> {
    if labels.iter().any(|l| l.as_ref().trim().is_empty()) {
        return Err(TriageError::InvalidInput(
            "candidate labels must not be blank".into(),
        ));
    }
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].iter().any(|prev| prev.as_ref() == label.as_ref()) {
            return Err(TriageError::InvalidInput(format!(
                "duplicate candidate label '{}'",
                label.as_ref()
            )));
        }
    }
    if labels.len() < 2 {
        return Err(TriageError::InvalidInput(format!(
            "zero-shot classification needs at least 2 distinct candidate labels, got {}",
            labels.len()
        )));
    }
    Ok(())
}

/// A single label with its classifier confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationScore {
    pub label: String,
    /// Confidence in `[0, 1]`, as returned upstream (not renormalized).
    pub score: f64,
}

impl ClassificationScore {
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Ranked outcome of one aspect's classification.
///
/// `scores` is sorted by descending score with ties kept in candidate-label
/// order. `top_label`/`top_score` mirror `scores[0]`, or a sentinel label when
/// `scores` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AspectResult {
    pub aspect_id: String,
    pub scores: Vec<ClassificationScore>,
    pub top_label: String,
    pub top_score: f64,
}

impl AspectResult {
    /// Wrap an already-ranked score list.
    ///
    /// An empty list yields the [`UNKNOWN_LABEL`] sentinel with score 0.
    #[must_use]
    pub fn from_ranked(aspect_id: impl Into<String>, scores: Vec<ClassificationScore>) -> Self {
        let (top_label, top_score) = scores
            .first()
            .map_or_else(|| (UNKNOWN_LABEL.to_string(), 0.0), |s| (s.label.clone(), s.score));
        Self {
            aspect_id: aspect_id.into(),
            scores,
            top_label,
            top_score,
        }
    }

    /// Placeholder for an aspect whose classification failed.
    #[must_use]
    pub fn unavailable(aspect_id: impl Into<String>) -> Self {
        Self {
            aspect_id: aspect_id.into(),
            scores: Vec::new(),
            top_label: UNAVAILABLE_LABEL.to_string(),
            top_score: 0.0,
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.scores.is_empty() && self.top_label == UNAVAILABLE_LABEL
    }

    /// True when the classifier answered with no labels at all.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.scores.is_empty() && self.top_label == UNKNOWN_LABEL
    }
}
