//! Portfolio API - GitHub-backed data for the portfolio frontend.
//!
//! Serves recent commit history and the yearly contribution calendar by
//! proxying GitHub's REST and GraphQL APIs. Stateless: every request is
//! answered from upstream data.

pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use state::{AppState, SharedState};

/// Full application router with CORS and request tracing.
pub fn build_app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
