use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        generation_backend::{BackendLoader, HttpBackendLoader},
        generation_client::GenerationClient,
        pipeline_orchestrator::PipelineOrchestrator,
        problem_ingestor::ProblemIngestor,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generation_client: Arc<GenerationClient>,
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let loader = HttpBackendLoader::from_config(&config);
        Self::with_loader(config, Box::new(loader))
    }

    /// Builds the state around an arbitrary backend loader.
    pub fn with_loader(config: Config, loader: Box<dyn BackendLoader>) -> AppResult<Self> {
        let ingestor = ProblemIngestor::new(config.fetch_timeout)?;
        Ok(Self::with_components(config, ingestor, loader))
    }

    pub fn with_components(
        config: Config,
        ingestor: ProblemIngestor,
        loader: Box<dyn BackendLoader>,
    ) -> Self {
        let ingestor = Arc::new(ingestor);
        let generation_client = Arc::new(GenerationClient::new(&config, loader));
        let orchestrator = Arc::new(PipelineOrchestrator::new(
            ingestor,
            generation_client.clone(),
        ));

        Self {
            config: Arc::new(config),
            generation_client,
            orchestrator,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
