use vigil_config::VigilConfig;

use crate::config_warnings;

/// Load `.env`, then layered config, then warn about likely env-var typos.
pub fn load_config() -> anyhow::Result<VigilConfig> {
    let config = VigilConfig::load_with_dotenv()?;
    config_warnings::warn_unconfigured(&config);
    tracing::debug!(
        backend = %config.classifier.backend,
        store = config.store.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}
