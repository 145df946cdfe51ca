//! Accounts API endpoints.

use api_types::account::{Account, AccountCreate, AccountSummary, AccountUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, users};

pub(crate) fn map_summary(account: engine::Account) -> AccountSummary {
    AccountSummary {
        id: account.id,
        bank: account.bank,
        account_number: account.account_number,
        balance: account.balance,
    }
}

fn map_detail(detail: engine::AccountDetail) -> Account {
    Account {
        id: detail.account.id,
        bank: detail.account.bank,
        account_number: detail.account.account_number,
        balance: detail.account.balance,
        user: users::map_summary(detail.user),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountCreate>,
) -> Result<(StatusCode, Json<Account>), ServerError> {
    let detail = state
        .engine
        .create_account(&payload.bank, &payload.account_number, payload.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(map_detail(detail))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Account>>, ServerError> {
    let accounts = state.engine.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(map_detail).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, ServerError> {
    let detail = state.engine.account(id).await?;
    Ok(Json(map_detail(detail)))
}

pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Account>>, ServerError> {
    let accounts = state.engine.list_accounts_by_user(user_id).await?;
    Ok(Json(accounts.into_iter().map(map_detail).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AccountUpdate>,
) -> Result<Json<Account>, ServerError> {
    let detail = state
        .engine
        .update_account(id, &payload.bank, &payload.account_number)
        .await?;
    Ok(Json(map_detail(detail)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
