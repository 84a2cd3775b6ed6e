//! Zero-shot classification service configuration.

use serde::{Deserialize, Serialize};

/// Hosted inference endpoint for `facebook/bart-large-mnli`.
pub const DEFAULT_HOSTED_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

fn default_backend() -> String {
    String::from("hosted")
}

fn default_endpoint() -> String {
    String::from(DEFAULT_HOSTED_ENDPOINT)
}

/// Default per-request timeout.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Which backend answers classification calls: `hosted` or `local`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Endpoint URL the backend posts to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the hosted inference API.
    #[serde(default)]
    pub api_token: String,

    /// Timeout applied to each classification call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            endpoint: default_endpoint(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    /// Check if the classifier config has the minimum required fields.
    ///
    /// The hosted backend needs a token; a local endpoint does not.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && (self.is_local() || !self.api_token.is_empty())
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.backend.eq_ignore_ascii_case("local")
    }

    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
