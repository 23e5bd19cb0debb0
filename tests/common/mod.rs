#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;

use problem_explainer::{
    config::Config,
    errors::{AppError, AppResult},
    services::generation_backend::{BackendLoader, GenerationRequest, TextBackend},
};

pub const TWO_SUM: &str =
    "Given an array nums and target, return indices of two numbers that add up to target.";

pub const CONCEPTS_JSON: &str = r#"{"concepts": ["Hash table", "Array traversal"],
  "prerequisites": ["Arrays"], "difficulty": "Easy",
  "difficulty_reason": "One pass with a hash table", "analogy": "Matching socks from a pile"}"#;

pub const SOLUTIONS_JSON: &str = r#"{
  "naive_approach": {"name": "Brute Force", "intuition": "Try every pair", "pseudocode": "for i, j: check",
    "time_complexity": "O(n^2)", "space_complexity": "O(1)", "limitation": "Quadratic"},
  "optimal_approach": {"name": "Hash Map", "key_insight": "Look up complements", "pseudocode": "seen = {}",
    "time_complexity": "O(n)", "space_complexity": "O(n)", "why_optimal": "Single pass"},
  "worked_example": {"input": "nums = [2,7], target = 9", "steps": ["2 stored", "7 finds 2"], "output": "[0, 1]"}
}"#;

pub const PITFALLS_JSON: &str = r#"{
  "pitfalls": [{"mistake": "Reusing an index", "why_fails": "Same element twice", "fix": "Look up before insert"}],
  "edge_cases": ["Negative numbers"],
  "related_problems": [{"name": "3Sum", "platform": "LeetCode", "difficulty": "Medium",
    "similarity": "Complement search", "difference": "Three numbers"}]
}"#;

/// Picks a canned reply by the stage prompt's opening line.
pub fn stage_reply(prompt: &str) -> String {
    if prompt.contains("You are a CS educator") {
        format!("Sure! Here is the analysis:\n{}\nHope this helps!", CONCEPTS_JSON)
    } else if prompt.contains("You are a coding interview expert") {
        SOLUTIONS_JSON.to_string()
    } else if prompt.contains("You are a TA analyzing") {
        PITFALLS_JSON.to_string()
    } else {
        "Use a hash map of complements to solve it in one pass.".to_string()
    }
}

pub type Script = dyn Fn(usize, &str) -> AppResult<String> + Send + Sync;

/// In-memory backend answering each call from a script; records every prompt.
pub struct ScriptedBackend {
    script: Arc<Script>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn complete(&self, request: &GenerationRequest) -> AppResult<String> {
        let mut prompts = self.prompts.lock().map_err(|e| AppError::Generation(e.to_string()))?;
        let call = prompts.len();
        prompts.push(request.prompt.clone());
        drop(prompts);
        (self.script)(call, &request.prompt)
    }
}

pub struct ScriptedLoader {
    pub backend: Arc<ScriptedBackend>,
    pub loads: Arc<AtomicUsize>,
    pub fail: bool,
}

impl ScriptedLoader {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(usize, &str) -> AppResult<String> + Send + Sync + 'static,
    {
        Self {
            backend: Arc::new(ScriptedBackend {
                script: Arc::new(script),
                prompts: Mutex::new(Vec::new()),
            }),
            loads: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    pub fn staged() -> Self {
        Self::new(|_, prompt| Ok(stage_reply(prompt)))
    }

    pub fn failing() -> Self {
        let mut loader = Self::staged();
        loader.fail = true;
        loader
    }

    pub fn calls(&self) -> usize {
        self.backend.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait]
impl BackendLoader for ScriptedLoader {
    async fn load(&self) -> AppResult<Arc<dyn TextBackend>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Generation("weights not found".to_string()));
        }
        Ok(self.backend.clone())
    }
}

/// Handle onto a loader that has been moved into the service.
pub struct LoaderProbe {
    pub backend: Arc<ScriptedBackend>,
    pub loads: Arc<AtomicUsize>,
}

impl LoaderProbe {
    pub fn of(loader: &ScriptedLoader) -> Self {
        Self {
            backend: loader.backend.clone(),
            loads: loader.loads.clone(),
        }
    }

    pub fn calls(&self) -> usize {
        self.backend.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.backend.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

pub fn test_config() -> Config {
    Config {
        model_id: "microsoft/phi-2".to_string(),
        hf_token: None,
        device: "cpu".to_string(),
        quantization: "none".to_string(),
        max_prompt_tokens: 2048,
        temperature: 0.7,
        generation_endpoint: "http://127.0.0.1:9".to_string(),
        generation_timeout: None,
        eos_token_id: None,
        pad_token_id: None,
        fetch_timeout: Duration::from_secs(5),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8000,
        cors_allowed_origin: "*".to_string(),
        fast_mode: true,
    }
}
