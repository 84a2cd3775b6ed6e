//! # vigil-classifier
//!
//! Zero-shot text classification for Vigil triage.
//!
//! [`ClassifierClient`] asks one aspect question of a report description and
//! returns a ranked [`AspectResult`]. It issues exactly one outbound request
//! per call, with no retries, and applies:
//! - input validation (non-blank text, at least two distinct labels)
//! - a fixed per-call timeout
//! - response validation (labels/scores present, equal length, scores in `[0, 1]`)
//! - the stable tie-break ranking (see [`ranking`])
//!
//! Backends:
//! - [`HostedZeroShot`]: hosted inference API (`facebook/bart-large-mnli`)
//! - [`LocalAnalysis`]: self-hosted analysis endpoint

pub mod hosted;
pub mod local;
pub mod ranking;

mod error;
mod http;

pub use error::{ClassifierError, UnavailableReason};
pub use hosted::HostedZeroShot;
pub use local::LocalAnalysis;
pub use ranking::{RawClassification, rank_scores};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vigil_config::ClassifierConfig;
use vigil_core::{AspectDefinition, AspectResult, aspect::validate_candidate_labels};

// ── Backend seam ───────────────────────────────────────────────────

/// One outbound zero-shot request/response exchange.
///
/// Implementations only decode the wire format; validation, ranking, and the
/// timeout live in [`ClassifierClient`].
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Send one classification request.
    ///
    /// # Errors
    ///
    /// Returns [`UnavailableReason`] on transport failure, non-success status,
    /// or an undecodable body.
    async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<RawClassification, UnavailableReason>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Classification client shared by all concurrent aspect queries.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct ClassifierClient {
    backend: Arc<dyn ClassifierBackend>,
    timeout: Duration,
}

impl std::fmt::Debug for ClassifierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierClient")
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClassifierClient {
    #[must_use]
    pub fn new(backend: Arc<dyn ClassifierBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Build a client for the backend named in `config`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("vigil/0.1")
            .timeout(config.timeout())
            .build()
            .expect("reqwest client should build");

        let backend: Arc<dyn ClassifierBackend> = if config.is_local() {
            Arc::new(LocalAnalysis::new(http, config.endpoint.clone()))
        } else {
            Arc::new(HostedZeroShot::new(
                http,
                config.endpoint.clone(),
                config.api_token.clone(),
            ))
        };
        Self::new(backend, config.timeout())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Classify `text` against the aspect's candidate labels.
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::InvalidInput`] if `text` is blank or the aspect has
    ///   fewer than two distinct labels. No request is sent.
    /// - [`ClassifierError::Unavailable`] on transport failure, timeout,
    ///   non-success status, or a malformed response. Default scores are never
    ///   substituted.
    pub async fn classify(
        &self,
        text: &str,
        aspect: &AspectDefinition,
    ) -> Result<AspectResult, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidInput(
                "text to classify must not be empty".into(),
            ));
        }
        validate_candidate_labels(&aspect.candidate_labels)
            .map_err(|e| ClassifierError::InvalidInput(e.to_string()))?;

        let unavailable = |reason: UnavailableReason| ClassifierError::Unavailable {
            aspect_id: aspect.aspect_id.clone(),
            reason,
        };

        tracing::debug!(
            aspect_id = %aspect.aspect_id,
            backend = self.backend.name(),
            labels = aspect.candidate_labels.len(),
            "sending classification request"
        );

        let raw = tokio::time::timeout(
            self.timeout,
            self.backend.zero_shot(text, &aspect.candidate_labels),
        )
        .await
        .map_err(|_| unavailable(UnavailableReason::Timeout(self.timeout)))?
        .map_err(unavailable)?;

        let ranked = rank_scores(&aspect.candidate_labels, raw).map_err(unavailable)?;
        if ranked.is_empty() {
            tracing::warn!(aspect_id = %aspect.aspect_id, "classifier returned no labels");
        }
        Ok(AspectResult::from_ranked(aspect.aspect_id.clone(), ranked))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use vigil_core::UNKNOWN_LABEL;

    use super::*;

    /// Backend that returns a canned answer after an optional delay.
    struct Canned {
        answer: fn() -> Result<RawClassification, UnavailableReason>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(answer: fn() -> Result<RawClassification, UnavailableReason>) -> Self {
            Self {
                answer,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ClassifierBackend for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn zero_shot(
            &self,
            _text: &str,
            _candidate_labels: &[String],
        ) -> Result<RawClassification, UnavailableReason> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.answer)()
        }
    }

    fn sentiment() -> AspectDefinition {
        AspectDefinition::new("sentiment", "Sentiment", &["positive", "neutral", "negative"], true)
            .unwrap()
    }

    fn sentiment_answer() -> Result<RawClassification, UnavailableReason> {
        Ok(RawClassification::new(
            vec!["negative".into(), "neutral".into(), "positive".into()],
            vec![0.81, 0.15, 0.04],
        ))
    }

    fn make_client(backend: Canned) -> (ClassifierClient, Arc<Canned>) {
        let backend = Arc::new(backend);
        (
            ClassifierClient::new(backend.clone(), Duration::from_secs(10)),
            backend,
        )
    }

    #[tokio::test]
    async fn classify_ranks_and_reports_top_label() {
        let (client, backend) = make_client(Canned::new(sentiment_answer));
        let result = client.classify("my bag was stolen", &sentiment()).await.unwrap();

        assert_eq!(result.aspect_id, "sentiment");
        assert_eq!(result.top_label, "negative");
        assert_eq!(result.scores.len(), 3);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_request() {
        let (client, backend) = make_client(Canned::new(sentiment_answer));
        let err = client.classify("   \n\t", &sentiment()).await.unwrap_err();

        assert!(matches!(err, ClassifierError::InvalidInput(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_label_aspect_is_rejected_without_request() {
        let (client, backend) = make_client(Canned::new(sentiment_answer));
        let aspect = AspectDefinition {
            aspect_id: "lonely".into(),
            display_name: "Lonely".into(),
            candidate_labels: vec!["only".into()],
            show_score: false,
        };
        let err = client.classify("text", &aspect).await.unwrap_err();

        assert!(matches!(err, ClassifierError::InvalidInput(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_failure_carries_aspect_context() {
        let (client, _) = make_client(Canned::new(|| {
            Err(UnavailableReason::Api {
                status: 500,
                message: "boom".into(),
            })
        }));
        let err = client.classify("text", &sentiment()).await.unwrap_err();

        assert_eq!(err.aspect_id(), Some("sentiment"));
        assert!(matches!(
            err,
            ClassifierError::Unavailable {
                reason: UnavailableReason::Api { status: 500, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_answer_is_unavailable_not_defaulted() {
        let (client, _) = make_client(Canned::new(|| {
            Ok(RawClassification::new(
                vec!["negative".into(), "neutral".into()],
                vec![0.9],
            ))
        }));
        let err = client.classify("text", &sentiment()).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Unavailable {
                reason: UnavailableReason::Malformed(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn empty_answer_yields_unknown_sentinel() {
        let (client, _) = make_client(Canned::new(|| Ok(RawClassification::default())));
        let result = client.classify("text", &sentiment()).await.unwrap();
        assert_eq!(result.top_label, UNKNOWN_LABEL);
        assert!(result.scores.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out() {
        let backend = Canned {
            delay: Duration::from_secs(60),
            ..Canned::new(sentiment_answer)
        };
        let (client, _) = make_client(backend);
        let err = client.classify("text", &sentiment()).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn from_config_selects_backend() {
        let hosted = ClassifierClient::from_config(&ClassifierConfig::default());
        assert_eq!(hosted.backend_name(), "hosted");

        let local = ClassifierClient::from_config(&ClassifierConfig {
            backend: "local".into(),
            endpoint: "http://127.0.0.1:5000/analyze".into(),
            timeout_secs: 3,
            ..Default::default()
        });
        assert_eq!(local.backend_name(), "local");
        assert_eq!(local.timeout(), Duration::from_secs(3));
    }
}
