use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::services::orchestrator_steps::stage_steps::PipelineStage;

/// Maximum number of characters of generated text echoed back in errors.
pub const PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Unsupported platform: {0}. Please use LeetCode or HackerRank URLs, or paste text directly.")]
    UnsupportedPlatform(String),

    #[error("{0} is blocking automated requests (403 Forbidden). Please paste the problem text directly using the 'Paste Text' option instead.")]
    Blocked(String),

    #[error("Network error: {0}. Check the URL or paste the problem text directly instead.")]
    Network(String),

    #[error("Could not extract a problem description from {0}. Please paste the problem text directly using the 'Paste Text' option instead.")]
    Extraction(String),

    #[error("Problem text is too short or empty ({0} characters, at least 10 required).")]
    InputTooShort(usize),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Could not extract valid JSON from response ({reason}): {preview}")]
    Parse { reason: String, preview: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: PipelineStage,
        #[source]
        source: Box<AppError>,
    },

    #[error("Request cancelled before completion")]
    Cancelled,
}

impl AppError {
    pub fn parse(reason: impl Into<String>, text: &str) -> Self {
        AppError::Parse {
            reason: reason.into(),
            preview: preview(text),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedPlatform(_) => "UNSUPPORTED_PLATFORM",
            AppError::Blocked(_) => "BLOCKED",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::InputTooShort(_) => "INPUT_TOO_SHORT",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Parse { .. } => "PARSE_ERROR",
            AppError::Generation(_) => "GENERATION_ERROR",
            AppError::StageFailed { source, .. } => source.error_code(),
            AppError::Cancelled => "CANCELLED",
        }
    }

    /// Errors a pipeline stage may recover from with one amended retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Parse { .. } | AppError::Generation(_))
    }
}

/// Truncates `text` to [`PREVIEW_LIMIT`] characters on a char boundary.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_LIMIT).collect()
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedPlatform(_)
            | AppError::Blocked(_)
            | AppError::Network(_)
            | AppError::Extraction(_)
            | AppError::InputTooShort(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Parse { .. } | AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StageFailed { source, .. } => source.status_code(),
            AppError::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT)
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            preview(&self.to_string())
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            error,
            code: status.as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network(format!("request timed out: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
