use std::{env, time::Duration};

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub model_id: String,
    pub hf_token: Option<SecretString>,
    pub device: String,
    pub quantization: String,
    pub max_prompt_tokens: usize,
    pub temperature: f32,
    pub generation_endpoint: String,
    pub generation_timeout: Option<Duration>,
    pub eos_token_id: Option<u32>,
    pub pad_token_id: Option<u32>,
    pub fetch_timeout: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub fast_mode: bool,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            model_id: env::var("HF_MODEL")
                .unwrap_or_else(|_| "deepseek-ai/deepseek-coder-6.7b-instruct-awq".to_string()),
            hf_token: env::var("HF_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
            device: env::var("DEVICE").unwrap_or_else(|_| "cuda".to_string()),
            quantization: env::var("QUANTIZATION").unwrap_or_else(|_| "4bit".to_string()),
            max_prompt_tokens: parsed("MAX_LENGTH").unwrap_or(2048),
            temperature: parsed("TEMPERATURE").unwrap_or(0.7),
            generation_endpoint: env::var("GENERATION_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            generation_timeout: parsed::<u64>("GENERATION_TIMEOUT_SECS").map(Duration::from_secs),
            eos_token_id: parsed("EOS_TOKEN_ID"),
            pad_token_id: parsed("PAD_TOKEN_ID"),
            fetch_timeout: Duration::from_secs(parsed("FETCH_TIMEOUT_SECS").unwrap_or(30)),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parsed("WEB_SERVER_PORT").unwrap_or(8000),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "*".to_string()),
            fast_mode: parsed("FAST_MODE").unwrap_or(false),
        }
    }

    /// Padding falls back to the end-of-sequence token when not configured.
    pub fn effective_pad_token_id(&self) -> Option<u32> {
        self.pad_token_id.or(self.eos_token_id)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            model_id: "TinyLlama/TinyLlama-1.1B-Chat-v1.0".to_string(),
            hf_token: None,
            device: "cpu".to_string(),
            quantization: "none".to_string(),
            max_prompt_tokens: 2048,
            temperature: 0.7,
            generation_endpoint: "http://127.0.0.1:9".to_string(),
            generation_timeout: None,
            eos_token_id: Some(2),
            pad_token_id: None,
            fetch_timeout: Duration::from_secs(5),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            cors_allowed_origin: "*".to_string(),
            fast_mode: true,
        }
    }
}
