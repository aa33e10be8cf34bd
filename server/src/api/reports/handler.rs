//! Reports API Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::core::ServerState;
use crate::db::repository::history as history_repo;
use crate::reports;
use crate::utils::time::period_bounds;
use shared::error::AppResult;
use shared::models::{BookingHistory, ReportPeriod, RevenueReport};
use shared::now_millis;

#[derive(serde::Deserialize)]
pub struct PeriodQuery {
    pub period: Option<ReportPeriod>,
}

/// GET /api/reports/stats?period=daily|weekly|monthly
pub async fn stats(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<RevenueReport>> {
    let tz = state.timezone().await;
    let period = query.period.unwrap_or(ReportPeriod::Daily);
    let report = reports::revenue(&state.pool, tz, period, now_millis()).await?;
    Ok(Json(report))
}

/// GET /api/reports/history?period= - archived bookings whose session
/// started inside the period
pub async fn history_for_period(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<BookingHistory>>> {
    let tz = state.timezone().await;
    let period = query.period.unwrap_or(ReportPeriod::Daily);
    let (start, end) = period_bounds(period, now_millis(), tz);
    let records = history_repo::find_between(&state.pool, start, end).await?;
    Ok(Json(records))
}
