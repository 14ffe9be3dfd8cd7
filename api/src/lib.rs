//! HTTP layer: router, shared state, error mapping, CORS, startup checks.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::core::app_state::AppState;
use crate::routes::{
    analyze::analyze_route::{analyze, analyze_offer, match_report},
    ask::ask_route::ask,
    chat::chat_route::chat,
    root_route::root,
};

/// Builds the state, verifies startup preconditions, and serves until
/// ctrl-c.
///
/// Provider health failures only warn (generation errors surface per
/// request); an unavailable or empty vector index aborts startup, because
/// every endpoint depends on it.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    for status in state.llm.health_all().await {
        let model = status.model.as_deref().unwrap_or("-");
        if status.ok {
            info!(
                "provider healthy: {} {} ({}) {}ms",
                status.provider, model, status.endpoint, status.latency_ms
            );
        } else {
            warn!(
                "provider unhealthy: {} {} ({}): {}",
                status.provider, model, status.endpoint, status.message
            );
        }
    }

    // Warm-index precondition: fail fast with a clear diagnostic instead
    // of discovering a missing index on the first query.
    state
        .index
        .ensure_ready()
        .await
        .map_err(|e| AppError::Startup(e.to_string()))?;

    let app = router(state);

    let address = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!("listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/ask", post(ask))
        .route("/analyze", post(analyze))
        .route("/analyze-offer", post(analyze_offer))
        .route("/match-report", post(match_report))
        .layer(middleware::from_fn(
            middleware_layer::json_extractor::json_error_mapper,
        ))
        .layer(cors_layer())
        .with_state(state)
}

/// Permissive CORS by default; restricted to `FRONTEND_ORIGIN` when set.
fn cors_layer() -> CorsLayer {
    match env::var("FRONTEND_ORIGIN") {
        Ok(origin) if !origin.trim().is_empty() => match origin.parse() {
            Ok(value) => CorsLayer::new()
                .allow_origin(AllowOrigin::exact(value))
                .allow_methods(Any)
                .allow_headers(Any),
            Err(e) => {
                warn!("invalid FRONTEND_ORIGIN '{}': {}; allowing any origin", origin, e);
                CorsLayer::permissive()
            }
        },
        _ => CorsLayer::permissive(),
    }
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
    }
}
