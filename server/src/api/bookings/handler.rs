//! Bookings API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::booking::{archive, service};
use crate::core::ServerState;
use crate::db::repository::{booking as booking_repo, group as group_repo};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    Booking, BookingComplete, BookingCreate, BookingExtend, BookingStatus, BookingUpdate,
    GroupCreate, RefreshReport, SessionGroup,
};
use shared::now_millis;

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub status: Option<BookingStatus>,
}

/// A group and its member bookings
#[derive(serde::Serialize)]
pub struct GroupResponse {
    pub group: SessionGroup,
    pub bookings: Vec<Booking>,
}

/// Refresh outcome: what was swept and archived, and what is still active
#[derive(serde::Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub report: RefreshReport,
    pub active: Vec<Booking>,
}

fn with_current_statuses(bookings: Vec<Booking>, now: i64) -> Vec<Booking> {
    bookings
        .into_iter()
        .map(|b| service::with_current_status(b, now))
        .collect()
}

/// GET /api/bookings - all bookings, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = match query.status {
        Some(status) => booking_repo::find_by_status(&state.pool, status).await?,
        None => booking_repo::find_all(&state.pool).await?,
    };
    Ok(Json(with_current_statuses(bookings, now_millis())))
}

/// GET /api/bookings/active - upcoming, running and paused bookings
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<Booking>>> {
    let bookings = booking_repo::find_active(&state.pool).await?;
    Ok(Json(with_current_statuses(bookings, now_millis())))
}

/// GET /api/bookings/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = booking_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).with_detail("id", id))?;
    Ok(Json(service::with_current_status(booking, now_millis())))
}

/// POST /api/bookings - create a booking
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let tz = state.timezone().await;
    let booking = service::create(&state.pool, tz, payload, now_millis()).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/group - book several seats under one group code
pub async fn create_group(
    State(state): State<ServerState>,
    Json(payload): Json<GroupCreate>,
) -> AppResult<Json<GroupResponse>> {
    let tz = state.timezone().await;
    let (group, bookings) = service::create_group(&state.pool, tz, payload, now_millis()).await?;
    Ok(Json(GroupResponse { group, bookings }))
}

/// GET /api/bookings/group/:group_id
pub async fn get_group(
    State(state): State<ServerState>,
    Path(group_id): Path<i64>,
) -> AppResult<Json<GroupResponse>> {
    let group = group_repo::find_by_id(&state.pool, group_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GroupNotFound).with_detail("id", group_id))?;
    let bookings = booking_repo::find_by_group(&state.pool, group_id).await?;
    Ok(Json(GroupResponse {
        group,
        bookings: with_current_statuses(bookings, now_millis()),
    }))
}

/// PUT /api/bookings/:id - edit contact, seat or food lines
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    let booking = service::update(&state.pool, id, payload, now_millis()).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/:id/pause
pub async fn pause(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = service::pause(&state.pool, id, now_millis()).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/:id/resume
pub async fn resume(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = service::resume(&state.pool, id, now_millis()).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/:id/extend - add time at the tariff in effect now
pub async fn extend(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingExtend>,
) -> AppResult<Json<Booking>> {
    let tz = state.timezone().await;
    let booking = service::extend(&state.pool, tz, id, payload, now_millis()).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/:id/complete - settle the bill and close the session
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingComplete>,
) -> AppResult<Json<Booking>> {
    let booking = service::complete(&state.pool, id, payload, now_millis()).await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    service::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/bookings/refresh - sweep statuses, archive terminal bookings,
/// return the surviving active set
pub async fn refresh(State(state): State<ServerState>) -> AppResult<Json<RefreshResponse>> {
    let now = now_millis();
    let report = archive::refresh(&state, now).await?;
    let active = booking_repo::find_active(&state.pool).await?;
    Ok(Json(RefreshResponse {
        report,
        active: with_current_statuses(active, now),
    }))
}
