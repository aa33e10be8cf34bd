//! Pricing API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, pricing as pricing_repo};
use crate::pricing::resolver;
use crate::utils::time::parse_hhmm;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    Category, HappyHoursWindow, HappyHoursWindowCreate, HappyHoursWindowUpdate, PriceQuote,
    PricingConfig, PricingConfigCreate, PricingConfigUpdate, QuoteRequest, Tariff,
};
use shared::now_millis;

/// Replace one category's regular rate card wholesale
#[derive(serde::Deserialize)]
pub struct ReplaceCategoryRequest {
    pub category: Category,
    pub configs: Vec<PricingConfigCreate>,
}

fn ensure_hhmm(label: &str, value: &str) -> AppResult<()> {
    if parse_hhmm(value).is_none() {
        return Err(
            AppError::new(ErrorCode::InvalidTimeWindow).with_detail(label, value.to_string())
        );
    }
    Ok(())
}

/// GET /api/pricing - the regular rate card, all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PricingConfig>>> {
    let rows = pricing_repo::find_all(&state.pool, Tariff::Regular).await?;
    Ok(Json(rows))
}

/// POST /api/pricing - swap out one category's regular rows atomically
pub async fn replace_category(
    State(state): State<ServerState>,
    Json(payload): Json<ReplaceCategoryRequest>,
) -> AppResult<Json<Vec<PricingConfig>>> {
    let rows = pricing_repo::replace_category(
        &state.pool,
        Tariff::Regular,
        payload.category,
        payload.configs,
    )
    .await?;
    tracing::info!(category = ?payload.category, rows = rows.len(), "Rate card replaced");
    Ok(Json(rows))
}

/// DELETE /api/pricing/:category - drop a category's regular rows
pub async fn delete_category(
    State(state): State<ServerState>,
    Path(category): Path<Category>,
) -> AppResult<Json<ApiResponse<()>>> {
    pricing_repo::delete_category(&state.pool, Tariff::Regular, category).await?;
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/pricing/quote - price a prospective booking without creating it
pub async fn quote(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<PriceQuote>> {
    let tz = state.timezone().await;
    let quote = resolver::quote(&state.pool, tz, &payload, now_millis()).await?;
    Ok(Json(quote))
}

/// GET /api/pricing/happy-hours
pub async fn list_windows(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<HappyHoursWindow>>> {
    let windows = pricing_repo::find_windows(&state.pool).await?;
    Ok(Json(windows))
}

/// POST /api/pricing/happy-hours
pub async fn create_window(
    State(state): State<ServerState>,
    Json(payload): Json<HappyHoursWindowCreate>,
) -> AppResult<Json<HappyHoursWindow>> {
    ensure_hhmm("start_time", &payload.start_time)?;
    ensure_hhmm("end_time", &payload.end_time)?;
    let window = pricing_repo::insert_window(&state.pool, payload).await?;
    Ok(Json(window))
}

/// PUT /api/pricing/happy-hours/:id
pub async fn update_window(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<HappyHoursWindowUpdate>,
) -> AppResult<Json<HappyHoursWindow>> {
    if let Some(start) = &payload.start_time {
        ensure_hhmm("start_time", start)?;
    }
    if let Some(end) = &payload.end_time {
        ensure_hhmm("end_time", end)?;
    }
    let window = pricing_repo::update_window(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::WindowNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(window))
}

/// DELETE /api/pricing/happy-hours/:id
pub async fn delete_window(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !pricing_repo::delete_window(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::WindowNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/pricing/happy-hours/pricing - the happy-hours rate card
pub async fn list_happy_hours_prices(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PricingConfig>>> {
    let rows = pricing_repo::find_all(&state.pool, Tariff::HappyHours).await?;
    Ok(Json(rows))
}

/// POST /api/pricing/happy-hours/pricing
pub async fn create_happy_hours_price(
    State(state): State<ServerState>,
    Json(payload): Json<PricingConfigCreate>,
) -> AppResult<Json<PricingConfig>> {
    let row = pricing_repo::insert_price(&state.pool, Tariff::HappyHours, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::DuplicatePricing),
            other => other.into(),
        })?;
    Ok(Json(row))
}

/// PUT /api/pricing/happy-hours/pricing/:id
pub async fn update_happy_hours_price(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PricingConfigUpdate>,
) -> AppResult<Json<PricingConfig>> {
    let row = pricing_repo::update_price(&state.pool, Tariff::HappyHours, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::PricingNotFound).with_detail("id", id)
            }
            RepoError::Duplicate(_) => AppError::new(ErrorCode::DuplicatePricing),
            other => other.into(),
        })?;
    Ok(Json(row))
}

/// DELETE /api/pricing/happy-hours/pricing/:id
pub async fn delete_happy_hours_price(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !pricing_repo::delete_price(&state.pool, Tariff::HappyHours, id).await? {
        return Err(AppError::new(ErrorCode::PricingNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}
