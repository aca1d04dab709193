use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::database::models::Entity;
use crate::error::ApiError;
use crate::handlers::validation::EntityPayload;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::DynService;

/// Collection and item routes for one entity, e.g. `/api/categories` and
/// `/api/categories/:id`. Methods outside the table answer 405. An empty id
/// (`/api/categories/`) is an invalid id.
pub fn routes<T: Entity>(collection: &str, service: DynService<T>) -> Router {
    Router::new()
        .route(
            collection,
            get(list::<T>)
                .post(create::<T>)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{}/", collection),
            get(missing_id::<T>)
                .put(missing_id::<T>)
                .delete(missing_id::<T>)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{}/:id", collection),
            get(show::<T>)
                .put(update::<T>)
                .delete(remove::<T>)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

/// GET /api/{entities} - List every record
pub async fn list<T: Entity>(State(service): State<DynService<T>>) -> ApiResult<Vec<T>> {
    let records = service.get_all().await?;
    Ok(ApiResponse::success(records))
}

/// POST /api/{entities} - Create a record; the store assigns the id
pub async fn create<T: Entity>(
    State(service): State<DynService<T>>,
    JsonBody(payload): JsonBody<EntityPayload>,
) -> ApiResult<T> {
    let mut entity: T = payload.into_entity(0)?;
    service.create(&mut entity).await?;
    tracing::info!("Created {} {}", T::LABEL, entity.id());
    Ok(ApiResponse::created(entity))
}

/// GET /api/{entities}/:id - Fetch one record
pub async fn show<T: Entity>(
    Path(id): Path<String>,
    State(service): State<DynService<T>>,
) -> ApiResult<T> {
    let id = parse_id::<T>(&id)?;
    let entity = service.get_by_id(id).await?;
    Ok(ApiResponse::success(entity))
}

/// PUT /api/{entities}/:id - Replace every field of a record
pub async fn update<T: Entity>(
    Path(id): Path<String>,
    State(service): State<DynService<T>>,
    JsonBody(payload): JsonBody<EntityPayload>,
) -> ApiResult<T> {
    let id = parse_id::<T>(&id)?;
    let entity: T = payload.into_entity(id)?;
    service.update(&entity).await?;
    Ok(ApiResponse::success(entity))
}

/// DELETE /api/{entities}/:id - Hard delete a record
pub async fn remove<T: Entity>(
    Path(id): Path<String>,
    State(service): State<DynService<T>>,
) -> ApiResult<Value> {
    let id = parse_id::<T>(&id)?;
    service.delete(id).await?;
    tracing::info!("Deleted {} {}", T::LABEL, id);
    Ok(ApiResponse::success(json!({
        "message": format!("{} deleted successfully", T::LABEL)
    })))
}

async fn missing_id<T: Entity>() -> ApiError {
    invalid_id::<T>()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Ids are non-negative 32-bit integers
fn parse_id<T: Entity>(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(invalid_id::<T>)
}

fn invalid_id<T: Entity>() -> ApiError {
    ApiError::bad_request(format!("Invalid {} ID", T::LABEL))
}
