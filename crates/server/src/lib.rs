//! Issue Tracker REST API Server Library
//!
//! Serves the project-scoped issue collection at `/api/issues/:project`.
//! The binary wires this up with configuration and logging; tests use
//! [`create_app`] or [`create_routes`] directly.

pub mod body;
pub mod cli;
pub mod config;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use issues::{CommandExecutor, IssueStore};

// Re-export for convenience
pub use config::ServerConfig;
pub use routes::{create_routes, ResponseMode};

/// Build the full application: API routes under `/api` plus CORS and
/// request tracing.
pub fn create_app<S: IssueStore + 'static>(
    executor: Arc<CommandExecutor<S>>,
    mode: ResponseMode,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_routes(executor, mode))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
