use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapter;
mod api;
mod app;
mod model;
mod service;
#[cfg(test)]
mod testing;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        std::io::Error::other(e)
    })?;
    let bind_addr = config.bind_addr();

    let state = AppState::new(config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let ensemble_service = web::Data::from(state.ensemble_service);
    let factcheck_service = web::Data::from(state.factcheck_service);
    let jwt_verifier = web::Data::from(state.jwt_verifier);

    tracing::info!("Starting FactGuard server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(ensemble_service.clone())
            .app_data(factcheck_service.clone())
            .app_data(jwt_verifier.clone())
            .app_data(api::json_config())
            .configure(api::detect::configure)
            .configure(api::factcheck::configure)
            .configure(api::models::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
