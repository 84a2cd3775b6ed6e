use vigil_config::VigilConfig;

pub fn warn_unconfigured(config: &VigilConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VigilConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.classifier.is_configured() && has_single_underscore(&env_keys, "VIGIL_CLASSIFIER") {
        warnings.push(
            "Classifier config appears incomplete while VIGIL_CLASSIFIER_* env vars exist. Use double underscores (example: VIGIL_CLASSIFIER__API_TOKEN)."
                .to_string(),
        );
    }

    if !config.store.is_configured() && has_single_underscore(&env_keys, "VIGIL_STORE") {
        warnings.push(
            "Store config appears default while VIGIL_STORE_* env vars exist. Use double underscores (example: VIGIL_STORE__DATABASE_URL)."
                .to_string(),
        );
    }

    warnings
}

/// `PREFIX_X` set but no `PREFIX__X`.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&nested))
}
