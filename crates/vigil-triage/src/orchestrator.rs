//! Concurrent fan-out of one description over every registered aspect.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use vigil_classifier::ClassifierClient;
use vigil_core::{AspectResult, TriageError, TriageResult};

use crate::registry::AspectRegistry;

/// Runs one classification per aspect and assembles a [`TriageResult`].
///
/// Per-aspect failures never fail the analysis: the aspect is replaced by the
/// "unavailable" placeholder and listed in
/// [`TriageResult::failed_aspects`].
#[derive(Debug, Clone)]
pub struct TriageOrchestrator {
    client: ClassifierClient,
    registry: Arc<AspectRegistry>,
}

impl TriageOrchestrator {
    #[must_use]
    pub const fn new(client: ClassifierClient, registry: Arc<AspectRegistry>) -> Self {
        Self { client, registry }
    }

    #[must_use]
    pub fn registry(&self) -> &AspectRegistry {
        &self.registry
    }

    /// Classify `description` against every aspect concurrently.
    ///
    /// Aspects come back in registry order whatever order the requests
    /// complete in. Dropping the returned future aborts every outstanding
    /// classification.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if `description` is blank. No
    /// request is sent in that case.
    pub async fn analyze(
        &self,
        report_id: &str,
        description: &str,
    ) -> Result<TriageResult, TriageError> {
        if description.trim().is_empty() {
            return Err(TriageError::InvalidInput(
                "report description must not be empty".into(),
            ));
        }

        let aspects = self.registry.list_aspects();
        let text: Arc<str> = Arc::from(description);
        let mut set = JoinSet::new();

        for (idx, aspect) in aspects.iter().enumerate() {
            let client = self.client.clone();
            let aspect = aspect.clone();
            let text = Arc::clone(&text);
            set.spawn(async move { (idx, client.classify(&text, &aspect).await) });
        }

        let mut slots: Vec<Option<AspectResult>> = vec![None; aspects.len()];
        while let Some(res) = set.join_next().await {
            match res {
                Ok((idx, Ok(result))) => slots[idx] = Some(result),
                Ok((idx, Err(e))) => {
                    tracing::warn!(
                        report_id,
                        aspect_id = %aspects[idx].aspect_id,
                        error = %e,
                        "aspect classification failed"
                    );
                }
                Err(e) => tracing::warn!(report_id, %e, "aspect classification task failed"),
            }
        }

        let mut results = Vec::with_capacity(aspects.len());
        let mut failed = Vec::new();
        for (aspect, slot) in aspects.iter().zip(slots) {
            if let Some(result) = slot {
                results.push(result);
            } else {
                failed.push(aspect.aspect_id.clone());
                results.push(AspectResult::unavailable(aspect.aspect_id.clone()));
            }
        }

        if failed.len() == aspects.len() {
            tracing::warn!(report_id, "every aspect failed; returning degraded result");
        } else {
            tracing::debug!(report_id, failed = failed.len(), "triage complete");
        }

        Ok(TriageResult::new(
            report_id.to_string(),
            results,
            failed,
            Utc::now(),
        ))
    }
}
