pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

pub use state::AppState;

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Build the HTTP application for the given services.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .merge(handlers::system::routes(state.pool.clone()))
        // Catalog resources
        .merge(handlers::catalog::routes("/api/categories", state.categories))
        .merge(handlers::catalog::routes("/api/products", state.products))
        .fallback(not_found)
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)))
        .layer(TraceLayer::new_for_http());

    if config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}
