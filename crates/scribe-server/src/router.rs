use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Create the router with all routes.
///
/// API routes live under `/api`; every other path is served from the
/// static frontend directory (`/` → `index.html`).
pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate-email", post(handlers::generate_email))
        .route("/api/health", get(handlers::health))
        .fallback_service(frontend)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until `shutdown` resolves.
pub async fn run<F>(state: Arc<AppState>, bind_addr: &str, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let static_dir = state.static_dir.display().to_string();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, static_dir = %static_dir, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
