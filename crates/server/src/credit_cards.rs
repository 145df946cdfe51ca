//! Credit cards API endpoints.

use api_types::credit_card::{CreditCard, CreditCardCreate, CreditCardSummary, CreditCardUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, users};

pub(crate) fn map_summary(card: engine::CreditCard) -> CreditCardSummary {
    CreditCardSummary {
        id: card.id,
        name: card.name,
        last_four_digits: card.last_four_digits,
        statement_close: card.statement_close,
        max_payment_due: card.max_payment_due,
    }
}

fn map_detail(detail: engine::CreditCardDetail) -> CreditCard {
    CreditCard {
        id: detail.card.id,
        name: detail.card.name,
        last_four_digits: detail.card.last_four_digits,
        statement_close: detail.card.statement_close,
        max_payment_due: detail.card.max_payment_due,
        user: users::map_summary(detail.user),
    }
}

fn fields_from_create(payload: &CreditCardCreate) -> engine::CreditCardFields {
    engine::CreditCardFields {
        name: payload.name.clone(),
        last_four_digits: payload.last_four_digits.clone(),
        statement_close: payload.statement_close.clone(),
        max_payment_due: payload.max_payment_due.clone(),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreditCardCreate>,
) -> Result<(StatusCode, Json<CreditCard>), ServerError> {
    let fields = fields_from_create(&payload);
    let detail = state.engine.create_credit_card(fields, payload.user_id).await?;
    Ok((StatusCode::CREATED, Json(map_detail(detail))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CreditCard>>, ServerError> {
    let cards = state.engine.list_credit_cards().await?;
    Ok(Json(cards.into_iter().map(map_detail).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<CreditCard>, ServerError> {
    let detail = state.engine.credit_card(id).await?;
    Ok(Json(map_detail(detail)))
}

pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<CreditCard>>, ServerError> {
    let cards = state.engine.list_credit_cards_by_user(user_id).await?;
    Ok(Json(cards.into_iter().map(map_detail).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreditCardUpdate>,
) -> Result<Json<CreditCard>, ServerError> {
    let fields = engine::CreditCardFields {
        name: payload.name,
        last_four_digits: payload.last_four_digits,
        statement_close: payload.statement_close,
        max_payment_due: payload.max_payment_due,
    };
    let detail = state.engine.update_credit_card(id, fields).await?;
    Ok(Json(map_detail(detail)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_credit_card(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
