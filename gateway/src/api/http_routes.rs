use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::domain::{Account, IdempotencyKeyRecord, LedgerEntryPair, Notification, TransferOut};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::ApiError;
use crate::use_cases::{
    GetBalanceUseCase, ListAccountsUseCase, ListIdempotencyKeysUseCase, ListLedgerEntriesUseCase,
    ListNotificationsUseCase, ProcessTransferUseCase,
};

pub struct AppState {
    pub process_transfer_use_case: ProcessTransferUseCase,
    pub get_balance_use_case: GetBalanceUseCase,
    pub list_accounts_use_case: ListAccountsUseCase,
    pub list_ledger_entries_use_case: ListLedgerEntriesUseCase,
    pub list_idempotency_keys_use_case: ListIdempotencyKeysUseCase,
    pub list_notifications_use_case: ListNotificationsUseCase,
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/transfer", post(transfer))
        .route("/balance/{account_id}", get(balance))
        .route("/health", get(health))
        .route("/accounts", get(list_accounts))
        .route("/ledger_entries", get(list_ledger_entries))
        .route("/idempotency_keys", get(list_idempotency_keys))
        .route("/notifications", get(list_notifications))
        .with_state(state)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequestBody {
    pub from_account: String,
    pub to_account: String,
    pub amount: i64,
    pub currency: Option<String>,
    pub idempotency_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceOut {
    pub account_id: String,
    pub balance: i64,
    pub currency: String,
}

#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferRequestBody,
    responses((status = 200, body = TransferOut))
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TransferRequestBody>,
) -> Result<Json<TransferOut>, ApiError> {
    let out = state
        .process_transfer_use_case
        .execute(
            payload.from_account,
            payload.to_account,
            payload.amount,
            payload.currency,
            payload.idempotency_key,
        )
        .await?;

    Ok(Json(out))
}

#[utoipa::path(
    get,
    path = "/balance/{account_id}",
    params(("account_id" = String, Path)),
    responses((status = 200, body = BalanceOut))
)]
pub async fn balance(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> Result<Json<BalanceOut>, ApiError> {
    let balance = state.get_balance_use_case.execute(&account_id).await?;

    Ok(Json(BalanceOut {
        account_id,
        balance: balance.balance,
        currency: balance.currency,
    }))
}

#[utoipa::path(get, path = "/health", responses((status = 200, body = serde_json::Value)))]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

#[utoipa::path(get, path = "/accounts", responses((status = 200, body = [Account])))]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.list_accounts_use_case.execute().await?;
    Ok(Json(accounts))
}

#[utoipa::path(get, path = "/ledger_entries", responses((status = 200, body = [LedgerEntryPair])))]
pub async fn list_ledger_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LedgerEntryPair>>, ApiError> {
    let entries = state.list_ledger_entries_use_case.execute().await?;
    Ok(Json(entries))
}

#[utoipa::path(get, path = "/idempotency_keys", responses((status = 200, body = [IdempotencyKeyRecord])))]
pub async fn list_idempotency_keys(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IdempotencyKeyRecord>>, ApiError> {
    let records = state.list_idempotency_keys_use_case.execute().await?;
    Ok(Json(records))
}

#[utoipa::path(get, path = "/notifications", responses((status = 200, body = [Notification])))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = state.list_notifications_use_case.execute().await?;
    Ok(Json(notifications))
}
