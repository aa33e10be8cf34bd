//! Device Config API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::device as device_repo;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Category, DeviceConfig, DeviceConfigUpsert};

/// GET /api/devices
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DeviceConfig>>> {
    let devices = device_repo::find_all(&state.pool).await?;
    Ok(Json(devices))
}

/// GET /api/devices/:category
pub async fn get_by_category(
    State(state): State<ServerState>,
    Path(category): Path<Category>,
) -> AppResult<Json<DeviceConfig>> {
    let device = device_repo::find_by_category(&state.pool, category)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::DeviceNotFound).with_detail("category", format!("{category:?}"))
        })?;
    Ok(Json(device))
}

/// POST /api/devices - set a category's seat count; seat names are
/// regenerated from the new count
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<DeviceConfigUpsert>,
) -> AppResult<Json<DeviceConfig>> {
    let device = device_repo::upsert(&state.pool, payload.category, payload.seat_count).await?;
    tracing::info!(category = ?device.category, seats = device.seat_count, "Device config saved");
    Ok(Json(device))
}

/// DELETE /api/devices/:category
pub async fn delete(
    State(state): State<ServerState>,
    Path(category): Path<Category>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !device_repo::delete(&state.pool, category).await? {
        return Err(
            AppError::new(ErrorCode::DeviceNotFound).with_detail("category", format!("{category:?}"))
        );
    }
    Ok(Json(ApiResponse::ok()))
}
