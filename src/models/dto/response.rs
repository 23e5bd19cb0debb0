use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub device: String,
    pub quantization: String,
    pub model_loaded: bool,
    pub uptime_secs: i64,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarmupResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub generate: &'static str,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            message: "Problem Explainer API",
            status: "running",
            version: env!("CARGO_PKG_VERSION"),
            health: "/api/health",
            generate: "/api/generate",
        }
    }
}
