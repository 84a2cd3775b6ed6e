//! Local analysis endpoint backend.
//!
//! The self-hosted analysis service answers with a list of label/score
//! objects instead of parallel arrays. It is normalized into the same
//! [`RawClassification`] the hosted backend produces.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    ClassifierBackend, error::UnavailableReason, http::check_response, ranking::RawClassification,
};

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    text: &'a str,
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
struct AnalysisResponse {
    sentiment_scores: Option<Vec<LabelScore>>,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Posts `{ text, candidate_labels }` to a local analysis endpoint.
pub struct LocalAnalysis {
    http: reqwest::Client,
    endpoint: String,
}

impl LocalAnalysis {
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ClassifierBackend for LocalAnalysis {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<RawClassification, UnavailableReason> {
        let body = AnalysisRequest {
            text,
            candidate_labels,
        };
        let resp = check_response(self.http.post(&self.endpoint).json(&body).send().await?).await?;
        let payload = resp.text().await?;
        parse_response(&payload)
    }
}

/// Decode a local analysis response body.
pub(crate) fn parse_response(body: &str) -> Result<RawClassification, UnavailableReason> {
    let data: AnalysisResponse = serde_json::from_str(body)
        .map_err(|e| UnavailableReason::Malformed(format!("invalid JSON: {e}")))?;
    let entries = data
        .sentiment_scores
        .ok_or_else(|| UnavailableReason::Malformed("missing 'sentiment_scores'".into()))?;
    let (labels, scores) = entries.into_iter().map(|e| (e.label, e.score)).unzip();
    Ok(RawClassification::new(labels, scores))
}
