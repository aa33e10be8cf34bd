//! Credit Ledger API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, credit as credit_repo};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CreditAccount, CreditEntry, CreditPayment, CreditPaymentCreate,
};
use shared::now_millis;

const PAYMENT_METHODS: [&str; 2] = ["cash", "upi_online"];

/// An account with its full ledger
#[derive(serde::Serialize)]
pub struct AccountDetail {
    pub account: CreditAccount,
    pub entries: Vec<CreditEntry>,
    pub payments: Vec<CreditPayment>,
}

async fn load_account(state: &ServerState, id: i64) -> AppResult<CreditAccount> {
    credit_repo::find_account(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CreditAccountNotFound).with_detail("id", id))
}

/// GET /api/credits - all accounts, outstanding first
pub async fn list_accounts(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CreditAccount>>> {
    let accounts = credit_repo::find_accounts(&state.pool).await?;
    Ok(Json(accounts))
}

/// GET /api/credits/:id - account plus entries and payments
pub async fn get_account(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AccountDetail>> {
    let account = load_account(&state, id).await?;
    let entries = credit_repo::find_entries(&state.pool, id).await?;
    let payments = credit_repo::find_payments(&state.pool, id).await?;
    Ok(Json(AccountDetail {
        account,
        entries,
        payments,
    }))
}

/// GET /api/credits/lookup/:phone - account by whatsapp number
pub async fn get_account_by_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<Json<CreditAccount>> {
    let account = credit_repo::find_account_by_whatsapp(&state.pool, &phone)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::CreditAccountNotFound).with_detail("phone", phone)
        })?;
    Ok(Json(account))
}

/// POST /api/credits/:id/payments - record a repayment
pub async fn record_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreditPaymentCreate>,
) -> AppResult<Json<CreditAccount>> {
    if payload.amount <= 0.0 {
        return Err(AppError::new(ErrorCode::InvalidPaymentAmount)
            .with_detail("amount", payload.amount));
    }
    if !PAYMENT_METHODS.contains(&payload.payment_method.as_str()) {
        return Err(AppError::new(ErrorCode::InvalidPaymentMethod)
            .with_detail("payment_method", payload.payment_method.clone()));
    }
    load_account(&state, id).await?;

    let amount = payload.amount;
    let account = credit_repo::record_payment(&state.pool, id, payload, now_millis())
        .await
        .map_err(|e| match e {
            RepoError::Validation(msg) if msg.contains("exceeds") => {
                AppError::new(ErrorCode::CreditOverpayment)
            }
            other => other.into(),
        })?;
    tracing::info!(
        account = id,
        amount,
        balance = account.current_balance,
        "Credit payment recorded"
    );
    Ok(Json(account))
}

/// POST /api/credits/entries/:id/paid - settle one entry by hand
pub async fn mark_entry_paid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CreditEntry>> {
    let entry = credit_repo::mark_entry_paid(&state.pool, id, now_millis())
        .await
        .map_err(|e| match e {
            RepoError::Validation(msg) if msg.contains("settled") => {
                AppError::new(ErrorCode::CreditEntryAlreadyPaid).with_detail("id", id)
            }
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::CreditEntryNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(entry))
}
