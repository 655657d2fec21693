use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeFile};
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::{
        ask::ask_question_route::ask_question_route,
        memory::reset_memory_route::reset_memory_route,
        system::status_route::{status_route, test_route},
    },
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:5000";

/// Build the HTTP router around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/api/ask", post(ask_question_route))
        .route("/api/memory/reset", post(reset_memory_route))
        .route("/api/status", get(status_route))
        .route("/test", get(test_route))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.into());

    let state = Arc::new(AppState::from_env()?);
    if !state.static_dir.join("index.html").is_file() {
        warn!(dir = %state.static_dir.display(), "index.html not found; GET / will return 404");
    }
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;
    info!(address = %host_url, "KENVI API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
