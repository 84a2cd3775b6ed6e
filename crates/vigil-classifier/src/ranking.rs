//! Response validation and the stable tie-break ranking.
//!
//! Upstream services usually return labels pre-sorted, but the ordering of
//! exactly tied scores is not guaranteed. Ranking therefore starts from the
//! declared candidate order and applies a stable descending sort, so ties
//! always come out in candidate order.

use std::cmp::Ordering;

use vigil_core::ClassificationScore;

use crate::error::UnavailableReason;

/// Labels and scores exactly as a backend decoded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawClassification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl RawClassification {
    #[must_use]
    pub const fn new(labels: Vec<String>, scores: Vec<f64>) -> Self {
        Self { labels, scores }
    }
}

/// Validate a raw answer against the candidate set and rank it.
///
/// A fully empty answer is degenerate but well-formed and ranks to an empty
/// list.
///
/// # Errors
///
/// Returns [`UnavailableReason::Malformed`] when labels and scores differ in
/// length, when the labels are not exactly the candidate set, or when a score
/// is not a finite number in `[0, 1]`.
pub fn rank_scores(
    candidate_labels: &[String],
    raw: RawClassification,
) -> Result<Vec<ClassificationScore>, UnavailableReason> {
    let RawClassification { labels, scores } = raw;

    if labels.len() != scores.len() {
        return Err(UnavailableReason::Malformed(format!(
            "{} labels but {} scores",
            labels.len(),
            scores.len()
        )));
    }
    if labels.is_empty() {
        return Ok(Vec::new());
    }
    if labels.len() != candidate_labels.len() {
        return Err(UnavailableReason::Malformed(format!(
            "expected {} labels, got {}",
            candidate_labels.len(),
            labels.len()
        )));
    }

    let mut slots: Vec<Option<f64>> = vec![None; candidate_labels.len()];
    for (label, score) in labels.iter().zip(scores) {
        let Some(index) = candidate_labels.iter().position(|c| c == label) else {
            return Err(UnavailableReason::Malformed(format!(
                "label '{label}' is not a candidate"
            )));
        };
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(UnavailableReason::Malformed(format!(
                "score {score} for '{label}' is outside [0, 1]"
            )));
        }
        if slots[index].replace(score).is_some() {
            return Err(UnavailableReason::Malformed(format!(
                "label '{label}' returned twice"
            )));
        }
    }

    // Every slot is filled: lengths match and no label repeats.
    let mut ranked: Vec<ClassificationScore> = candidate_labels
        .iter()
        .zip(slots)
        .map(|(label, score)| ClassificationScore::new(label.clone(), score.unwrap_or_default()))
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
