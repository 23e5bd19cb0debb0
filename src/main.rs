use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use problem_explainer::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn cors(allowed_origin: &str) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if allowed_origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(allowed_origin)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let fast_mode = config.fast_mode;

    log::info!("Model: {} on {} ({})", config.model_id, config.device, config.quantization);
    log::info!("Generation backend: {}", config.generation_endpoint);
    if fast_mode {
        log::info!("Fast mode enabled: POST /api/generate/quick");
    }

    let state = AppState::new(config)
        .map_err(|e| std::io::Error::other(format!("failed to build app state: {}", e)))?;
    let state = web::Data::new(Arc::new(state));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&state.config.cors_allowed_origin))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(|cfg| handlers::configure(cfg, fast_mode))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
