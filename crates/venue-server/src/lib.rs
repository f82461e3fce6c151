pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Metrics
        .route(
            "/api/metrics/reservations",
            post(routes::metrics::reservation_metrics),
        )
        .route("/api/metrics/summary", post(routes::metrics::summary))
        // VIP
        .route("/api/vip/check", post(routes::vip::check_vip))
        // Conduction
        .route(
            "/api/conduction",
            get(routes::conduction::list_confirmed).post(routes::conduction::confirm),
        )
        .route("/api/conduction/queue", post(routes::conduction::queue))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on a pre-bound listener.
///
/// Accepting a bound `TcpListener` lets the caller read the actual port
/// before starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(app_state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("venue API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn serve(app_state: AppState, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    serve_on(app_state, listener).await
}
