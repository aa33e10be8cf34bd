//! Promotions API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, pricing as pricing_repo, promotion as promotion_repo};
use crate::promotion::engine;
use crate::utils::money::round2;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    Category, PromotionCreate, PromotionDetails, PromotionKind, PromotionUpdate,
    PromotionWithStatus,
};
use shared::now_millis;

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub kind: Option<PromotionKind>,
}

/// Ask what a promotion would do to a price, without applying it
#[derive(serde::Deserialize)]
pub struct PreviewRequest {
    pub category: Category,
    pub duration: String,
    #[serde(default)]
    pub person_count: Option<i64>,
    pub base_price: f64,
}

/// Preview outcome. Counters stay untouched; nothing here is recorded.
#[derive(serde::Serialize)]
pub struct PreviewResponse {
    pub base_price: f64,
    pub final_price: f64,
    pub bonus_minutes: i64,
    pub promotion: Option<PromotionDetails>,
}

/// GET /api/promotions - all promotions with their status at now
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PromotionWithStatus>>> {
    let rows = match query.kind {
        Some(kind) => promotion_repo::find_by_kind(&state.pool, kind).await?,
        None => promotion_repo::find_all(&state.pool).await?,
    };
    let now = now_millis();
    Ok(Json(
        rows.into_iter().map(|p| engine::with_status(p, now)).collect(),
    ))
}

/// GET /api/promotions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PromotionWithStatus>> {
    let promotion = promotion_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id))?;
    Ok(Json(engine::with_status(promotion, now_millis())))
}

/// POST /api/promotions
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PromotionCreate>,
) -> AppResult<Json<PromotionWithStatus>> {
    engine::validate_value(payload.kind, payload.value)?;
    pricing_repo::ensure_person_count_rule(payload.category, payload.person_count.unwrap_or(1))?;
    let promotion = promotion_repo::insert(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::PromotionConflict, msg)
            }
            other => other.into(),
        })?;
    tracing::info!(id = promotion.id, kind = ?promotion.kind, "Promotion created");
    Ok(Json(engine::with_status(promotion, now_millis())))
}

/// PUT /api/promotions/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PromotionUpdate>,
) -> AppResult<Json<PromotionWithStatus>> {
    if let Some(value) = payload.value {
        let existing = promotion_repo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id))?;
        engine::validate_value(existing.kind, value)?;
    }
    let promotion = promotion_repo::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id)
            }
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::PromotionConflict, msg)
            }
            other => other.into(),
        })?;
    Ok(Json(engine::with_status(promotion, now_millis())))
}

/// DELETE /api/promotions/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !promotion_repo::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/promotions/preview - would-be outcome for a pricing key
pub async fn preview(
    State(state): State<ServerState>,
    Json(payload): Json<PreviewRequest>,
) -> AppResult<Json<PreviewResponse>> {
    let base_price = round2(payload.base_price);
    let candidates = promotion_repo::find_enabled_for_key(
        &state.pool,
        payload.category,
        &payload.duration,
        payload.person_count.unwrap_or(1),
    )
    .await?;

    let response = match engine::pick_valid(&candidates, now_millis()) {
        Some(promotion) => {
            let applied = engine::apply(promotion, base_price);
            PreviewResponse {
                base_price,
                final_price: applied.final_price,
                bonus_minutes: applied.bonus_minutes,
                promotion: Some(applied.details),
            }
        }
        None => PreviewResponse {
            base_price,
            final_price: base_price,
            bonus_minutes: 0,
            promotion: None,
        },
    };
    Ok(Json(response))
}
