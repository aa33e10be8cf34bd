//! Booking History API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::history as history_repo;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::BookingHistory;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;

#[derive(serde::Deserialize)]
pub struct HistoryQuery {
    /// Inclusive session-start date, `YYYY-MM-DD` in the business timezone
    pub start_date: Option<String>,
    /// Inclusive session-start date, `YYYY-MM-DD` in the business timezone
    pub end_date: Option<String>,
    /// Matches customer name, whatsapp number or booking code
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(serde::Serialize)]
pub struct HistoryPage {
    pub items: Vec<BookingHistory>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/history - paged archive listing, newest archive first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryPage>> {
    let tz = state.timezone().await;
    let start = match &query.start_date {
        Some(date) => day_start_millis(parse_date(date)?, tz),
        None => 0,
    };
    let end = match &query.end_date {
        Some(date) => day_end_millis(parse_date(date)?, tz),
        None => i64::MAX,
    };
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let items = history_repo::find_page(&state.pool, start, end, search, limit, offset).await?;
    let total = history_repo::count(&state.pool, start, end, search).await?;
    Ok(Json(HistoryPage {
        items,
        total,
        limit,
        offset,
    }))
}

/// GET /api/history/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingHistory>> {
    let record = history_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::HistoryNotFound).with_detail("id", id))?;
    Ok(Json(record))
}
