use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{preview, AppError, AppResult},
};

/// Lowest temperature sent to the sampler; zero collapses into greedy loops.
pub const MIN_TEMPERATURE: f32 = 0.1;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 50;
pub const REPETITION_PENALTY: f32 = 1.15;
pub const NO_REPEAT_NGRAM_SIZE: u32 = 3;

/// Sampling settings applied identically to every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
    pub do_sample: bool,
    pub truncate: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eos_token_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_token_id: Option<u32>,
}

impl SamplingParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.temperature.max(MIN_TEMPERATURE),
            top_p: TOP_P,
            top_k: TOP_K,
            repetition_penalty: REPETITION_PENALTY,
            no_repeat_ngram_size: NO_REPEAT_NGRAM_SIZE,
            do_sample: true,
            truncate: config.max_prompt_tokens,
            eos_token_id: config.eos_token_id,
            pad_token_id: config.effective_pad_token_id(),
        }
    }
}

/// One formatted prompt plus its sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: usize,
    pub params: SamplingParams,
}

/// A ready text-generation capability. Returns raw decoded text, which may
/// still echo the prompt.
#[async_trait]
pub trait TextBackend: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> AppResult<String>;
}

/// Acquires the backend; called at most once per process.
#[async_trait]
pub trait BackendLoader: Send + Sync {
    async fn load(&self) -> AppResult<Arc<dyn TextBackend>>;
}

#[derive(Debug, Serialize)]
struct GenerateParameters<'a> {
    max_new_tokens: usize,
    #[serde(flatten)]
    sampling: &'a SamplingParams,
}

#[derive(Debug, Serialize)]
struct GeneratePayload<'a> {
    inputs: &'a str,
    parameters: GenerateParameters<'a>,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InfoReply {
    model_id: Option<String>,
}

/// Text-generation-inference style HTTP server (`GET /info`, `POST /generate`).
pub struct HttpTextBackend {
    client: Client,
    endpoint: String,
    token: Option<SecretString>,
}

impl HttpTextBackend {
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }
}

#[async_trait]
impl TextBackend for HttpTextBackend {
    async fn complete(&self, request: &GenerationRequest) -> AppResult<String> {
        let payload = GeneratePayload {
            inputs: &request.prompt,
            parameters: GenerateParameters {
                max_new_tokens: request.max_new_tokens,
                sampling: &request.params,
            },
        };

        let response = self
            .authorized(self.client.post(format!("{}/generate", self.endpoint)))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("request to generation backend failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "generation backend returned {}: {}",
                status,
                preview(&body)
            )));
        }

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("invalid generation response: {}", e)))?;

        Ok(reply.generated_text)
    }
}

/// Connects to the configured endpoint and verifies it is serving a model.
pub struct HttpBackendLoader {
    endpoint: String,
    model_id: String,
    device: String,
    quantization: String,
    token: Option<SecretString>,
    timeout: Option<Duration>,
}

impl HttpBackendLoader {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.generation_endpoint.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            device: config.device.clone(),
            quantization: config.quantization.clone(),
            token: config.hf_token.clone(),
            timeout: config.generation_timeout,
        }
    }
}

#[async_trait]
impl BackendLoader for HttpBackendLoader {
    async fn load(&self) -> AppResult<Arc<dyn TextBackend>> {
        log::info!("Loading model: {}", self.model_id);
        log::info!("Device: {}, quantization: {}", self.device, self.quantization);

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Generation(format!("failed to build generation client: {}", e)))?;

        let backend = HttpTextBackend {
            client,
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
        };

        let response = backend
            .authorized(backend.client.get(format!("{}/info", self.endpoint)))
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("generation backend unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Generation(format!(
                "generation backend not ready ({})",
                response.status()
            )));
        }

        match response.json::<InfoReply>().await {
            Ok(InfoReply {
                model_id: Some(served),
            }) if served != self.model_id => {
                log::warn!(
                    "Generation backend serves '{}' but HF_MODEL is '{}'",
                    served,
                    self.model_id
                );
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not read backend info: {}", e),
        }

        log::info!("Model loaded successfully!");
        Ok(Arc::new(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_is_floor_clamped() {
        let mut config = Config::test_config();
        config.temperature = 0.0;
        assert_eq!(SamplingParams::from_config(&config).temperature, MIN_TEMPERATURE);

        config.temperature = 0.9;
        assert_eq!(SamplingParams::from_config(&config).temperature, 0.9);
    }

    #[test]
    fn test_sampling_params_carry_token_ids() {
        let params = SamplingParams::from_config(&Config::test_config());

        assert_eq!(params.eos_token_id, Some(2));
        assert_eq!(params.pad_token_id, Some(2));
        assert!(params.repetition_penalty > 1.0);
        assert_eq!(params.truncate, 2048);
    }

    #[test]
    fn test_payload_flattens_sampling_params() {
        let params = SamplingParams::from_config(&Config::test_config());
        let payload = GeneratePayload {
            inputs: "prompt",
            parameters: GenerateParameters {
                max_new_tokens: 64,
                sampling: &params,
            },
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["inputs"], "prompt");
        assert_eq!(value["parameters"]["max_new_tokens"], 64);
        assert_eq!(value["parameters"]["top_k"], 50);
        assert_eq!(value["parameters"]["no_repeat_ngram_size"], 3);
    }

    #[actix_web::test]
    async fn test_http_backend_round_trip() {
        use wiremock::matchers::{body_partial_json, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "model_id": "TinyLlama/TinyLlama-1.1B-Chat-v1.0" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({ "inputs": "hello" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "generated_text": "hello world" })),
            )
            .mount(&server)
            .await;

        let mut config = Config::test_config();
        config.generation_endpoint = server.uri();
        let backend = HttpBackendLoader::from_config(&config).load().await.unwrap();

        let request = GenerationRequest {
            prompt: "hello".to_string(),
            max_new_tokens: 8,
            params: SamplingParams::from_config(&config),
        };
        assert_eq!(backend.complete(&request).await.unwrap(), "hello world");
    }

    #[actix_web::test]
    async fn test_http_loader_fails_when_backend_down() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut config = Config::test_config();
        config.generation_endpoint = server.uri();
        let result = HttpBackendLoader::from_config(&config).load().await;

        assert!(matches!(result, Err(AppError::Generation(_))));
    }
}
