//! REST API for on-demand projections.
//!
//! Provides:
//! - `GET /config`: configured defaults and projection options
//! - `POST /project`: single-turbine projection
//! - `POST /compare`: multi-turbine summary table

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::AnalysisConfig;

pub use types::{CompareRequest, CompareResponse, ProjectRequest, TurbineRequest};

/// Immutable application state shared across all request handlers.
///
/// Holds the resolved configuration whose defaults fill in missing request
/// fields. Read-only, so it is shared through `Arc` without locks.
pub struct AppState {
    pub config: AnalysisConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/config", get(handlers::get_config))
        .route("/project", post(handlers::post_project))
        .route("/compare", post(handlers::post_compare))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
