//! Users API endpoints.

use api_types::user::{User, UserCreate, UserSummary, UserUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, accounts, credit_cards, movements, server::ServerState};

pub(crate) fn map_summary(summary: engine::UserSummary) -> UserSummary {
    UserSummary {
        id: summary.id,
        name: summary.name,
        email: summary.email,
        total_balance: summary.total_balance,
    }
}

pub(crate) fn map_detail(detail: engine::UserDetail) -> User {
    User {
        id: detail.user.id,
        name: detail.user.name,
        email: detail.user.email,
        movements: detail
            .movements
            .into_iter()
            .map(movements::map_movement)
            .collect(),
        credit_cards: detail
            .credit_cards
            .into_iter()
            .map(credit_cards::map_summary)
            .collect(),
        accounts: detail
            .accounts
            .into_iter()
            .map(accounts::map_summary)
            .collect(),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), ServerError> {
    let detail = state.engine.create_user(&payload.name, &payload.email).await?;
    Ok((StatusCode::CREATED, Json(map_detail(detail))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<User>>, ServerError> {
    let users = state.engine.list_users().await?;
    Ok(Json(users.into_iter().map(map_detail).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ServerError> {
    let detail = state.engine.user(id).await?;
    Ok(Json(map_detail(detail)))
}

pub async fn get_summary(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<UserSummary>, ServerError> {
    let summary = state.engine.user_summary(id).await?;
    Ok(Json(map_summary(summary)))
}

pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<UserSummary>, ServerError> {
    let summary = state.engine.user_by_email(&email).await?;
    Ok(Json(map_summary(summary)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<User>, ServerError> {
    let detail = state
        .engine
        .update_user(id, &payload.name, &payload.email)
        .await?;
    Ok(Json(map_detail(detail)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
