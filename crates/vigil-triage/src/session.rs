//! Supersession: only the newest analysis may become the current result.
//!
//! Every [`TriageSession::submit`] takes the next generation number and
//! publishes it on a `watch` channel. An in-flight analysis races its fan-out
//! against that channel; once a newer generation appears the fan-out future
//! is dropped, which aborts its classification tasks. A completion is only
//! committed while its generation is still the newest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use vigil_core::{TriageError, TriageResult};

use crate::orchestrator::TriageOrchestrator;

/// Outcome of one [`TriageSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// This invocation produced the current result.
    Current {
        generation: u64,
        result: Arc<TriageResult>,
    },
    /// A newer invocation started first; nothing was committed.
    Superseded { generation: u64 },
}

impl Submission {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Current { generation, .. } | Self::Superseded { generation } => *generation,
        }
    }

    #[must_use]
    pub const fn is_current(&self) -> bool {
        matches!(self, Self::Current { .. })
    }
}

/// Tracks which analysis is current for one caller (a view, a terminal).
///
/// Share it behind an `Arc` and call `submit` from as many tasks as needed.
#[derive(Debug)]
pub struct TriageSession {
    orchestrator: TriageOrchestrator,
    generation: AtomicU64,
    latest: watch::Sender<u64>,
    current: Mutex<Option<(u64, Arc<TriageResult>)>>,
}

impl TriageSession {
    #[must_use]
    pub fn new(orchestrator: TriageOrchestrator) -> Self {
        let (latest, _) = watch::channel(0);
        Self {
            orchestrator,
            generation: AtomicU64::new(0),
            latest,
            current: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn orchestrator(&self) -> &TriageOrchestrator {
        &self.orchestrator
    }

    /// Highest generation handed out so far.
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        *self.latest.borrow()
    }

    /// Whether `generation` is still the newest submission.
    #[must_use]
    pub fn is_latest(&self, generation: u64) -> bool {
        self.latest_generation() == generation
    }

    /// Last committed result and the generation that produced it.
    #[must_use]
    pub fn current(&self) -> Option<(u64, Arc<TriageResult>)> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Analyze `description`, superseding every earlier submission.
    ///
    /// A blank description is rejected up front and supersedes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if `description` is blank.
    pub async fn submit(
        &self,
        report_id: &str,
        description: &str,
    ) -> Result<Submission, TriageError> {
        if description.trim().is_empty() {
            return Err(TriageError::InvalidInput(
                "report description must not be empty".into(),
            ));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.send_modify(|latest| *latest = (*latest).max(generation));

        let mut rx = self.latest.subscribe();
        let superseded = async move {
            // The sender lives as long as `self`, so this only returns once a
            // newer generation is published.
            let _ = rx.wait_for(|&latest| latest > generation).await;
        };

        let result = tokio::select! {
            biased;
            () = superseded => {
                tracing::debug!(generation, report_id, "analysis superseded in flight");
                return Ok(Submission::Superseded { generation });
            }
            result = self.orchestrator.analyze(report_id, description) => result?,
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_latest(generation) {
            tracing::debug!(generation, report_id, "discarding stale analysis");
            return Ok(Submission::Superseded { generation });
        }
        let result = Arc::new(result);
        *current = Some((generation, Arc::clone(&result)));
        Ok(Submission::Current { generation, result })
    }
}
