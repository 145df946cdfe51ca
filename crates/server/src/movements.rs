//! Movements API endpoints.

use api_types::MovementKind as ApiKind;
use api_types::movement::{Movement, MovementCreate, MovementUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, accounts, categories, credit_cards, server::ServerState, users};

fn map_kind(kind: engine::MovementKind) -> ApiKind {
    match kind {
        engine::MovementKind::Income => ApiKind::Income,
        engine::MovementKind::Expense => ApiKind::Expense,
    }
}

fn unmap_kind(kind: ApiKind) -> engine::MovementKind {
    match kind {
        ApiKind::Income => engine::MovementKind::Income,
        ApiKind::Expense => engine::MovementKind::Expense,
    }
}

pub(crate) fn map_movement(movement: engine::Movement) -> Movement {
    Movement {
        id: movement.id,
        kind: map_kind(movement.kind),
        amount: movement.amount,
        date: movement.date,
        note: movement.note,
        user: users::map_summary(movement.user),
        category: categories::map_category(movement.category),
        credit_card: movement.credit_card.map(credit_cards::map_summary),
        account: movement.account.map(accounts::map_summary),
    }
}

fn draft_from_create(payload: MovementCreate) -> engine::MovementDraft {
    engine::MovementDraft {
        kind: unmap_kind(payload.kind),
        amount: payload.amount,
        note: payload.note,
        user_id: payload.user_id,
        category_id: payload.category_id,
        credit_card_id: payload.credit_card_id,
        account_id: payload.account_id,
    }
}

fn draft_from_update(payload: MovementUpdate) -> engine::MovementDraft {
    engine::MovementDraft {
        kind: unmap_kind(payload.kind),
        amount: payload.amount,
        note: payload.note,
        user_id: payload.user_id,
        category_id: payload.category_id,
        credit_card_id: payload.credit_card_id,
        account_id: payload.account_id,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MovementCreate>,
) -> Result<(StatusCode, Json<Movement>), ServerError> {
    let movement = state.engine.create_movement(draft_from_create(payload)).await?;
    Ok((StatusCode::CREATED, Json(map_movement(movement))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Movement>>, ServerError> {
    let movements = state.engine.list_movements().await?;
    Ok(Json(movements.into_iter().map(map_movement).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Movement>, ServerError> {
    let movement = state.engine.movement(id).await?;
    Ok(Json(map_movement(movement)))
}

pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Movement>>, ServerError> {
    let movements = state.engine.list_movements_by_user(user_id).await?;
    Ok(Json(movements.into_iter().map(map_movement).collect()))
}

pub async fn list_by_user_and_category(
    State(state): State<ServerState>,
    Path((user_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<Movement>>, ServerError> {
    let movements = state
        .engine
        .list_movements_by_user_and_category(user_id, category_id)
        .await?;
    Ok(Json(movements.into_iter().map(map_movement).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MovementUpdate>,
) -> Result<Json<Movement>, ServerError> {
    let movement = state
        .engine
        .update_movement(id, draft_from_update(payload))
        .await?;
    Ok(Json(map_movement(movement)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_movement(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
