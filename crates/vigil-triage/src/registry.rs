//! The fixed set of questions asked of every report.
//!
//! Order matters: it is the order aspects are queried in, stored in a
//! [`TriageResult`](vigil_core::TriageResult), and rendered in.

use std::collections::HashSet;

use vigil_core::{AspectDefinition, TriageError};

pub const SENTIMENT: &str = "sentiment";
pub const CRIME_CATEGORY: &str = "crime_category";
pub const ROUTING_DEPARTMENT: &str = "routing_department";
pub const SEVERITY: &str = "severity";

const SENTIMENT_LABELS: &[&str] = &["positive", "neutral", "negative"];

const CRIME_CATEGORY_LABELS: &[&str] = &[
    "theft",
    "assault",
    "fraud",
    "drug-related",
    "vandalism",
    "cybercrime",
];

const ROUTING_DEPARTMENT_LABELS: &[&str] = &[
    "local police department",
    "narcotics control bureau",
    "cyber crime investigation unit",
    "economic offenses wing",
    "women safety cell",
    "anti-terrorism squad",
    "traffic control department",
];

const SEVERITY_LABELS: &[&str] = &["low", "medium", "high"];

/// Ordered, immutable aspect table.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRegistry {
    aspects: Vec<AspectDefinition>,
}

impl Default for AspectRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl AspectRegistry {
    /// Build a registry from `aspects`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if the list is empty, an aspect id
    /// repeats, or any aspect's label set is invalid.
    pub fn new(aspects: Vec<AspectDefinition>) -> Result<Self, TriageError> {
        if aspects.is_empty() {
            return Err(TriageError::InvalidInput(
                "registry needs at least one aspect".into(),
            ));
        }
        let mut seen = HashSet::new();
        for aspect in &aspects {
            aspect.validate()?;
            if !seen.insert(aspect.aspect_id.as_str()) {
                return Err(TriageError::InvalidInput(format!(
                    "aspect '{}' registered twice",
                    aspect.aspect_id
                )));
            }
        }
        Ok(Self { aspects })
    }

    /// Sentiment, crime category, routing department, severity.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            aspects: vec![
                definition(SENTIMENT, "Sentiment", SENTIMENT_LABELS, true),
                definition(CRIME_CATEGORY, "Crime Type", CRIME_CATEGORY_LABELS, false),
                definition(ROUTING_DEPARTMENT, "Department", ROUTING_DEPARTMENT_LABELS, false),
                definition(SEVERITY, "Severity", SEVERITY_LABELS, false),
            ],
        }
    }

    #[must_use]
    pub fn list_aspects(&self) -> &[AspectDefinition] {
        &self.aspects
    }

    /// # Errors
    ///
    /// Returns [`TriageError::UnknownAspect`] if `aspect_id` is not registered.
    pub fn get_aspect(&self, aspect_id: &str) -> Result<&AspectDefinition, TriageError> {
        self.aspects
            .iter()
            .find(|a| a.aspect_id == aspect_id)
            .ok_or_else(|| TriageError::UnknownAspect(aspect_id.to_string()))
    }

    #[must_use]
    pub fn aspect_ids(&self) -> Vec<&str> {
        self.aspects.iter().map(|a| a.aspect_id.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }
}

fn definition(id: &str, display: &str, labels: &[&str], show_score: bool) -> AspectDefinition {
    AspectDefinition {
        aspect_id: id.to_string(),
        display_name: display.to_string(),
        candidate_labels: labels.iter().map(|l| (*l).to_string()).collect(),
        show_score,
    }
}
