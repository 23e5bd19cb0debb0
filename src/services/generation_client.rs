use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        generation_backend::{BackendLoader, GenerationRequest, SamplingParams, TextBackend},
        prompt_formatter::{formatter_for, PromptFormatter},
    },
};

/// The `generate(prompt, max_new_tokens) -> text` contract the pipeline runs on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Forces the one-time initialization of the backing capability.
    async fn warmup(&self) -> AppResult<()>;

    async fn generate(&self, prompt: &str, max_new_tokens: usize) -> AppResult<String>;
}

/// Process-wide client around a lazily loaded text backend.
///
/// The first caller runs the loader; concurrent first callers wait on the
/// same initialization and every later caller observes its outcome,
/// including a failure.
pub struct GenerationClient {
    loader: Box<dyn BackendLoader>,
    backend: OnceCell<Result<Arc<dyn TextBackend>, String>>,
    formatter: Box<dyn PromptFormatter>,
    params: SamplingParams,
}

impl GenerationClient {
    pub fn new(config: &Config, loader: Box<dyn BackendLoader>) -> Self {
        let formatter = formatter_for(&config.model_id);
        log::info!(
            "Using '{}' prompt format for model {}",
            formatter.name(),
            config.model_id
        );

        Self {
            loader,
            backend: OnceCell::new(),
            formatter,
            params: SamplingParams::from_config(config),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.backend.get(), Some(Ok(_)))
    }

    async fn backend(&self) -> AppResult<&Arc<dyn TextBackend>> {
        let outcome = self
            .backend
            .get_or_init(|| async {
                self.loader.load().await.map_err(|e| {
                    log::error!("Failed to initialize generation backend: {}", e);
                    e.to_string()
                })
            })
            .await;

        outcome
            .as_ref()
            .map_err(|message| AppError::Generation(format!("model failed to initialize: {}", message)))
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn warmup(&self) -> AppResult<()> {
        self.backend().await.map(|_| ())
    }

    async fn generate(&self, prompt: &str, max_new_tokens: usize) -> AppResult<String> {
        let backend = self.backend().await?;

        let request = GenerationRequest {
            prompt: self.formatter.format(prompt),
            max_new_tokens,
            params: self.params.clone(),
        };

        log::info!(
            "Generating with temperature={} max_new_tokens={}",
            request.params.temperature,
            max_new_tokens
        );
        let raw = backend.complete(&request).await.map_err(|e| match e {
            AppError::Generation(_) => e,
            other => AppError::Generation(other.to_string()),
        })?;

        let text = self.formatter.strip(&request.prompt, &raw);
        log::info!("Generated {} characters", text.chars().count());
        Ok(text)
    }
}
