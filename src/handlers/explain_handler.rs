use std::sync::Arc;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::dto::{
        request::GenerateRequestDto,
        response::{HealthResponse, ServiceInfo, WarmupResponse},
    },
    services::generation_client::Generator,
};

#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo::current())
}

#[post("/api/generate")]
async fn generate_explanation(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let request_id = get_request_id(&req).unwrap_or_default();
    log::info!(
        "[{}] Generating explanation for {:?} input ({} characters)",
        request_id,
        request.input_type,
        request.content.chars().count()
    );

    let orchestrator = state.orchestrator.clone();
    let document = run_cancellable(move |cancel| async move {
        orchestrator
            .run(request.input_type, &request.content, &cancel)
            .await
    })
    .await
    .inspect_err(|e| log::error!("[{}] Generation failed: {}", request_id, e))?;

    log::info!("[{}] Explanation assembled", request_id);
    Ok(HttpResponse::Ok().json(document))
}

#[post("/api/generate/quick")]
async fn generate_quick(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let request_id = get_request_id(&req).unwrap_or_default();
    log::info!("[{}] Fast mode generation", request_id);

    let orchestrator = state.orchestrator.clone();
    let quick = run_cancellable(move |cancel| async move {
        orchestrator
            .quick(request.input_type, &request.content, &cancel)
            .await
    })
    .await
    .inspect_err(|e| log::error!("[{}] Fast mode generation failed: {}", request_id, e))?;

    Ok(HttpResponse::Ok().json(quick))
}

#[get("/api/health")]
async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        model: state.config.model_id.clone(),
        device: state.config.device.clone(),
        quantization: state.config.quantization.clone(),
        model_loaded: state.generation_client.is_loaded(),
        uptime_secs: state.uptime_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[post("/api/warmup")]
async fn warmup(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    log::info!("Warming up model {}", state.config.model_id);
    state.generation_client.warmup().await?;

    Ok(HttpResponse::Ok().json(WarmupResponse {
        status: "Model loaded successfully".to_string(),
    }))
}

/// Runs `job` on its own task; if the handler is dropped (client gone) the
/// token is cancelled and the pipeline stops before its next stage.
async fn run_cancellable<F, Fut, T>(job: F) -> AppResult<T>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: std::future::Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    tokio::spawn(job(cancel))
        .await
        .map_err(|e| AppError::Generation(format!("pipeline task aborted: {}", e)))?
}

/// Registers the routes; the quick endpoint only exists in fast mode.
pub fn configure(cfg: &mut web::ServiceConfig, fast_mode: bool) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .service(root)
        .service(generate_explanation)
        .service(health)
        .service(warmup);

    if fast_mode {
        cfg.service(generate_quick);
    }
}
