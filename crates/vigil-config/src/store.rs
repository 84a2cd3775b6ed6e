//! Document store (realtime database) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Realtime database root URL (e.g. `https://<project>.firebaseio.com`).
    #[serde(default)]
    pub database_url: String,

    /// Database secret or ID token, sent as the `auth` query parameter.
    #[serde(default)]
    pub auth_token: String,
}

impl StoreConfig {
    /// Check if the store config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.database_url.trim().is_empty()
    }

    /// Auth token, if one is set.
    #[must_use]
    pub fn auth(&self) -> Option<&str> {
        let token = self.auth_token.trim();
        if token.is_empty() { None } else { Some(token) }
    }
}
