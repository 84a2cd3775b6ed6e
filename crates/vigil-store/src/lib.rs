//! # vigil-store
//!
//! Read-only client for the realtime document store that holds submitted
//! crime reports (`crimes/{id}`) and account profiles (`users/{uid}`).
//!
//! Every read is a single `GET {database_url}/{path}.json`, with the
//! configured token passed as the `auth` query parameter. A JSON `null`
//! body means the record does not exist.

mod error;
mod http;

pub use error::StoreError;

use vigil_config::StoreConfig;
use vigil_core::{CrimeReport, UserProfile};

/// HTTP client for the document store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    database_url: String,
    auth: Option<String>,
}

impl StoreClient {
    /// Create a client for `database_url`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(database_url: impl Into<String>, auth: Option<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("vigil/0.1")
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
            database_url: database_url.into().trim_end_matches('/').to_string(),
            auth: auth.filter(|t| !t.is_empty()),
        }
    }

    /// Build a client from the `[store]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotConfigured`] when `database_url` is empty.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured);
        }
        Ok(Self::new(
            config.database_url.clone(),
            config.auth().map(str::to_string),
        ))
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Fetch one report. `Ok(None)` when no record exists under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `id` is blank, the request fails, the store
    /// returns a non-success status, or the record cannot be parsed.
    pub async fn fetch_report(&self, id: &str) -> Result<Option<CrimeReport>, StoreError> {
        let body = self.get(&format!("crimes/{}", encode_key(id)?)).await?;
        parse_report(id, &body)
    }

    /// Fetch every report, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails or the collection is not a
    /// JSON object.
    pub async fn list_reports(&self) -> Result<Vec<CrimeReport>, StoreError> {
        let body = self.get("crimes").await?;
        parse_report_list(&body)
    }

    /// Fetch one account profile. `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `uid` is blank, the request fails, or the
    /// profile cannot be parsed.
    pub async fn fetch_user(&self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        let body = self.get(&format!("users/{}", encode_key(uid)?)).await?;
        parse_user(&body)
    }

    async fn get(&self, path: &str) -> Result<String, StoreError> {
        let url = format!("{}/{path}.json", self.database_url);
        tracing::debug!(path, "store read");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.auth {
            request = request.query(&[("auth", token)]);
        }
        let resp = http::check_response(request.send().await?).await?;
        Ok(resp.text().await?)
    }
}

fn encode_key(key: &str) -> Result<String, StoreError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(urlencoding::encode(key).into_owned())
}

/// Parse a single `crimes/{id}` body, stamping the key onto the record.
pub(crate) fn parse_report(id: &str, body: &str) -> Result<Option<CrimeReport>, StoreError> {
    let report: Option<CrimeReport> = serde_json::from_str(body)
        .map_err(|e| StoreError::Parse(format!("report '{id}': {e}")))?;
    Ok(report.map(|mut r| {
        r.id = id.trim().to_string();
        r
    }))
}

/// Parse the `crimes` collection.
///
/// Records that fail to parse are logged and skipped so one bad entry does
/// not hide the rest.
pub(crate) fn parse_report_list(body: &str) -> Result<Vec<CrimeReport>, StoreError> {
    let collection: Option<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(body).map_err(|e| StoreError::Parse(format!("crimes: {e}")))?;

    let mut reports: Vec<CrimeReport> = collection
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<CrimeReport>(value) {
            Ok(mut report) => {
                report.id = id;
                Some(report)
            }
            Err(e) => {
                tracing::warn!(report_id = %id, %e, "skipping unreadable report");
                None
            }
        })
        .collect();
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(reports)
}

pub(crate) fn parse_user(body: &str) -> Result<Option<UserProfile>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Parse(format!("user profile: {e}")))
}
