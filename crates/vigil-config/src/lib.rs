//! # vigil-config
//!
//! Layered configuration loading for Vigil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VIGIL_*` prefix, `__` as separator)
//! 2. Project-level `.vigil/config.toml`
//! 3. User-level `~/.config/vigil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VIGIL_CLASSIFIER__API_TOKEN` -> `classifier.api_token`,
//! `VIGIL_STORE__DATABASE_URL` -> `store.database_url`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vigil_config::VigilConfig;
//!
//! let config = VigilConfig::load_with_dotenv().expect("config");
//!
//! if config.store.is_configured() {
//!     println!("Store: {}", config.store.database_url);
//! }
//! ```

mod classifier;
mod error;
mod general;
mod store;

pub use classifier::{ClassifierConfig, DEFAULT_HOSTED_ENDPOINT};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vigil_core::TimeWindow;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VigilConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VigilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse, or
    /// [`ConfigError::InvalidValue`] if a loaded value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".vigil/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VIGIL_").split("__"))
    }

    /// Reject values that would load but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, an unknown
    /// classifier backend, or an unknown default window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let backend = self.classifier.backend.to_ascii_lowercase();
        if !matches!(backend.as_str(), "hosted" | "local") {
            return Err(ConfigError::InvalidValue {
                field: "classifier.backend".into(),
                reason: format!("expected 'hosted' or 'local', got '{}'", self.classifier.backend),
            });
        }

        self.default_window()?;
        Ok(())
    }

    /// Parsed `general.default_window`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the window string is unknown.
    pub fn default_window(&self) -> Result<TimeWindow, ConfigError> {
        self.general
            .default_window
            .parse::<TimeWindow>()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "general.default_window".into(),
                reason,
            })
    }

    /// Fail with [`ConfigError::NotConfigured`] unless the store is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `store.database_url` is empty.
    pub fn require_store(&self) -> Result<&StoreConfig, ConfigError> {
        if self.store.is_configured() {
            Ok(&self.store)
        } else {
            Err(ConfigError::NotConfigured {
                section: "store".into(),
            })
        }
    }

    /// Fail with [`ConfigError::NotConfigured`] unless the classifier is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the endpoint or (for the
    /// hosted backend) the API token is missing.
    pub fn require_classifier(&self) -> Result<&ClassifierConfig, ConfigError> {
        if self.classifier.is_configured() {
            Ok(&self.classifier)
        } else {
            Err(ConfigError::NotConfigured {
                section: "classifier".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing
    /// if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
