//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_window() -> String {
    String::from("all")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default recency window for `reports list` (`all`, `1h`, `24h`, `week`).
    #[serde(default = "default_window")]
    pub default_window: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_window: default_window(),
            default_limit: default_limit(),
        }
    }
}
