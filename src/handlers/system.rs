use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::DatabaseManager;
use crate::error::ApiError;

/// Service info and liveness routes. `pool` is `None` for the in-memory backend.
pub fn routes(pool: Option<PgPool>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(pool)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Catalog API",
        "version": version,
        "endpoints": {
            "health": "/health",
            "categories": "/api/categories[/:id]",
            "products": "/api/products[/:id]",
        }
    }))
}

async fn health(State(pool): State<Option<PgPool>>) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now();

    let database = match pool {
        None => "memory",
        Some(pool) => {
            DatabaseManager::health_check(&pool).await.map_err(|e| {
                tracing::warn!("Health check failed: {}", e);
                ApiError::service_unavailable(format!("database unavailable: {}", e))
            })?;
            "ok"
        }
    };

    Ok(Json(json!({
        "status": "OK",
        "message": "API Running",
        "timestamp": now,
        "database": database
    })))
}
