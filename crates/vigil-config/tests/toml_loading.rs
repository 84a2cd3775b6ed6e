//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files, cwd, and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use vigil_config::{ConfigError, VigilConfig};
use vigil_core::TimeWindow;

#[test]
fn loads_classifier_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[classifier]
backend = "hosted"
endpoint = "https://inference.example/models/bart-large-mnli"
api_token = "hf_toml"
timeout_secs = 4
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.classifier.endpoint,
            "https://inference.example/models/bart-large-mnli"
        );
        assert_eq!(config.classifier.api_token, "hf_toml");
        assert_eq!(config.classifier.timeout_secs, 4);
        assert!(config.classifier.is_configured());
        Ok(())
    });
}

#[test]
fn loads_store_and_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
database_url = "https://vigil-demo.firebaseio.com"
auth_token = "db-secret"

[general]
default_window = "24h"
default_limit = 50
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.database_url, "https://vigil-demo.firebaseio.com");
        assert_eq!(config.store.auth(), Some("db-secret"));
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.default_window().unwrap(), TimeWindow::Last24Hours);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[classifier]
api_token = "hf_only_token"
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.classifier.backend, "hosted");
        assert_eq!(config.classifier.timeout_secs, 10);
        assert_eq!(
            config.classifier.endpoint,
            vigil_config::DEFAULT_HOSTED_ENDPOINT
        );
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[classifier]
api_token = "hf_toml"
timeout_secs = 4
"#,
        )?;
        jail.set_env("VIGIL_CLASSIFIER__API_TOKEN", "hf_env");

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("VIGIL_").split("__"))
            .extract()?;

        assert_eq!(config.classifier.api_token, "hf_env");
        assert_eq!(config.classifier.timeout_secs, 4);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(
            ".vigil/config.toml",
            r#"
[classifier]
backend = "local"
endpoint = "http://127.0.0.1:5000/analyze"

[store]
database_url = "https://project.firebaseio.com"
"#,
        )?;

        let config = VigilConfig::load().expect("config loads");
        assert!(config.classifier.is_local());
        assert!(config.classifier.is_configured());
        assert_eq!(config.store.database_url, "https://project.firebaseio.com");
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("VIGIL_CLASSIFIER__TIMEOUT_SECS", "0");

        let err = VigilConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
