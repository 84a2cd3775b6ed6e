use std::sync::Arc;

use vigil_classifier::ClassifierClient;
use vigil_config::VigilConfig;
use vigil_store::StoreClient;
use vigil_triage::{AspectRegistry, ResultPresenter, TriageOrchestrator};

/// Loaded configuration plus the shared aspect registry. Clients are built
/// lazily so commands only require the sections they use.
pub struct AppContext {
    pub config: VigilConfig,
    pub registry: Arc<AspectRegistry>,
}

impl AppContext {
    #[must_use]
    pub fn new(config: VigilConfig) -> Self {
        Self {
            config,
            registry: Arc::new(AspectRegistry::standard()),
        }
    }

    pub fn orchestrator(&self) -> anyhow::Result<TriageOrchestrator> {
        let classifier = self.config.require_classifier()?;
        Ok(TriageOrchestrator::new(
            ClassifierClient::from_config(classifier),
            Arc::clone(&self.registry),
        ))
    }

    pub fn store(&self) -> anyhow::Result<StoreClient> {
        Ok(StoreClient::from_config(self.config.require_store()?)?)
    }

    #[must_use]
    pub fn presenter(&self) -> ResultPresenter {
        ResultPresenter::new(Arc::clone(&self.registry))
    }
}
