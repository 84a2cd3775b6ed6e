//! Assembled triage output and chart-ready series.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aspect::AspectResult;

/// Outcome of one `analyze` invocation.
///
/// Aspects are held in registry order, one entry per registered aspect.
/// Built once by the orchestrator and only read afterwards, so the fields are
/// exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TriageResult {
    report_id: String,
    aspects: Vec<AspectResult>,
    /// Aspect ids whose classification failed, in registry order.
    failed_aspects: Vec<String>,
    computed_at: DateTime<Utc>,
}

impl TriageResult {
    #[must_use]
    pub const fn new(
        report_id: String,
        aspects: Vec<AspectResult>,
        failed_aspects: Vec<String>,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            report_id,
            aspects,
            failed_aspects,
            computed_at,
        }
    }

    #[must_use]
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// All aspect results in registry order.
    #[must_use]
    pub fn aspects(&self) -> &[AspectResult] {
        &self.aspects
    }

    /// Look up one aspect's result by id.
    #[must_use]
    pub fn aspect(&self, aspect_id: &str) -> Option<&AspectResult> {
        self.aspects.iter().find(|a| a.aspect_id == aspect_id)
    }

    #[must_use]
    pub fn aspect_ids(&self) -> Vec<&str> {
        self.aspects.iter().map(|a| a.aspect_id.as_str()).collect()
    }

    #[must_use]
    pub fn failed_aspects(&self) -> &[String] {
        &self.failed_aspects
    }

    #[must_use]
    pub const fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    /// At least one aspect is unavailable.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.failed_aspects.is_empty()
    }

    /// Every aspect is unavailable.
    #[must_use]
    pub fn is_fully_unavailable(&self) -> bool {
        !self.aspects.is_empty() && self.failed_aspects.len() == self.aspects.len()
    }

    /// Copy of this result with `computed_at` pinned, for comparisons that
    /// must ignore when the analysis ran.
    #[must_use]
    pub fn with_computed_at(&self, computed_at: DateTime<Utc>) -> Self {
        Self {
            computed_at,
            ..self.clone()
        }
    }
}

/// One bar or pie slice. `value` is a percentage in `[0, 100]` rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartSeries {
    pub name: String,
    pub value: f64,
}

impl ChartSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
