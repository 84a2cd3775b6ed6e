//! Hosted zero-shot inference backend (`facebook/bart-large-mnli`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    ClassifierBackend, error::UnavailableReason, http::check_response, ranking::RawClassification,
};

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Option<Vec<String>>,
    scores: Option<Vec<f64>>,
}

/// Posts `{ inputs, parameters: { candidate_labels } }` with a bearer token.
pub struct HostedZeroShot {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl HostedZeroShot {
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
        }
    }
}

#[async_trait]
impl ClassifierBackend for HostedZeroShot {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<RawClassification, UnavailableReason> {
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters { candidate_labels },
        };
        let mut request = self.http.post(&self.endpoint).json(&body);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let resp = check_response(request.send().await?).await?;
        let payload = resp.text().await?;
        parse_response(&payload)
    }
}

/// Decode a hosted zero-shot response body.
pub(crate) fn parse_response(body: &str) -> Result<RawClassification, UnavailableReason> {
    let data: ZeroShotResponse = serde_json::from_str(body)
        .map_err(|e| UnavailableReason::Malformed(format!("invalid JSON: {e}")))?;
    let labels = data
        .labels
        .ok_or_else(|| UnavailableReason::Malformed("missing 'labels'".into()))?;
    let scores = data
        .scores
        .ok_or_else(|| UnavailableReason::Malformed("missing 'scores'".into()))?;
    Ok(RawClassification::new(labels, scores))
}
