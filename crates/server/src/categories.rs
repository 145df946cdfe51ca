//! Categories API endpoints.

use api_types::category::{Category, CategoryCreate, CategoryUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_category(category: engine::Category) -> Category {
    Category {
        id: category.id,
        name: category.name,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), ServerError> {
    let category = state.engine.create_category(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ServerError> {
    let categories = state.engine.list_categories().await?;
    Ok(Json(categories.into_iter().map(map_category).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServerError> {
    let category = state.engine.category(id).await?;
    Ok(Json(map_category(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<Category>, ServerError> {
    let category = state.engine.update_category(id, &payload.name).await?;
    Ok(Json(map_category(category)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
