//! Chart series and the plain-text summary derived from a [`TriageResult`].
//!
//! Everything here is recomputed from the result on each call.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use vigil_core::{AspectResult, ChartSeries, TriageResult};

use crate::registry::{AspectRegistry, SENTIMENT, SEVERITY};

/// Round to two decimals, halves away from zero.
///
/// Rounds the binary `f64`, not its decimal text, so a value like `1.005`
/// (stored as `1.00499...`) rounds down to `1.0`. This matches how the
/// dashboard's `toFixed(2)` renders the same scores.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One bar per score, as a percentage, in ranked order.
#[must_use]
pub fn to_chart_series(result: &AspectResult) -> Vec<ChartSeries> {
    result
        .scores
        .iter()
        .map(|s| ChartSeries::new(s.label.clone(), round_half_up(s.score * 100.0)))
        .collect()
}

/// A single full slice for the top label. Empty when the aspect has no scores
/// (unavailable or unknown).
#[must_use]
pub fn to_single_slice(result: &AspectResult) -> Vec<ChartSeries> {
    if result.scores.is_empty() {
        return Vec::new();
    }
    vec![ChartSeries::new(result.top_label.clone(), 100.0)]
}

/// Everything a renderer needs for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TriageView {
    pub result: TriageResult,
    pub sentiment_bars: Vec<ChartSeries>,
    pub severity_slice: Vec<ChartSeries>,
    pub summary: String,
}

/// Formats results using the registry's display names.
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    registry: Arc<AspectRegistry>,
}

impl ResultPresenter {
    #[must_use]
    pub const fn new(registry: Arc<AspectRegistry>) -> Self {
        Self { registry }
    }

    /// One `"<Display Name>: <label>"` line per aspect, in result order.
    ///
    /// Aspects flagged `show_score` append the top score as a percentage.
    /// Unavailable aspects read `"<Display Name>: unavailable"`.
    #[must_use]
    pub fn to_summary_text(&self, result: &TriageResult) -> String {
        result
            .aspects()
            .iter()
            .map(|aspect| self.summary_line(aspect))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bundle the result with its charts and summary.
    #[must_use]
    pub fn present(&self, result: &TriageResult) -> TriageView {
        TriageView {
            sentiment_bars: result.aspect(SENTIMENT).map(to_chart_series).unwrap_or_default(),
            severity_slice: result.aspect(SEVERITY).map(to_single_slice).unwrap_or_default(),
            summary: self.to_summary_text(result),
            result: result.clone(),
        }
    }

    fn summary_line(&self, aspect: &AspectResult) -> String {
        let definition = self.registry.get_aspect(&aspect.aspect_id).ok();
        let name = definition.map_or(aspect.aspect_id.as_str(), |d| d.display_name.as_str());
        let show_score = definition.is_some_and(|d| d.show_score);

        if show_score && !aspect.scores.is_empty() {
            format!(
                "{name}: {} ({:.2}%)",
                aspect.top_label,
                round_half_up(aspect.top_score * 100.0)
            )
        } else {
            format!("{name}: {}", aspect.top_label)
        }
    }
}
