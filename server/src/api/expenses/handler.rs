//! Expenses API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, expense as expense_repo};
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_positive_money, validate_required_text,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};

#[derive(serde::Deserialize)]
pub struct ExpenseQuery {
    /// Inclusive spend date, `YYYY-MM-DD` in the business timezone
    pub start_date: Option<String>,
    /// Inclusive spend date, `YYYY-MM-DD` in the business timezone
    pub end_date: Option<String>,
}

/// GET /api/expenses - optionally bounded by spend date
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let tz = state.timezone().await;
    let start = match &query.start_date {
        Some(date) => day_start_millis(parse_date(date)?, tz),
        None => 0,
    };
    let end = match &query.end_date {
        Some(date) => day_end_millis(parse_date(date)?, tz),
        None => i64::MAX,
    };
    let expenses = expense_repo::find_between(&state.pool, start, end).await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Expense>> {
    let expense = expense_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id))?;
    Ok(Json(expense))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_positive_money(payload.amount, "amount")?;
    let expense = expense_repo::insert(&state.pool, payload).await?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_NOTE_LEN)?;
    }
    if let Some(amount) = payload.amount {
        validate_positive_money(amount, "amount")?;
    }
    let expense = expense_repo::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !expense_repo::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}
