//! Food Items API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, food_item as food_repo};
use crate::utils::validation::{MAX_NAME_LEN, validate_money, validate_required_text};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{FoodItem, FoodItemCreate, FoodItemUpdate, StockAdjust};

/// GET /api/food-items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<FoodItem>>> {
    let items = food_repo::find_all(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/food-items/low-stock - items at or below their restock level
pub async fn list_low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<FoodItem>>> {
    let items = food_repo::find_low_stock(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/food-items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoodItem>> {
    let item = food_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::FoodItemNotFound).with_detail("id", id))?;
    Ok(Json(item))
}

/// POST /api/food-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<Json<FoodItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_money(payload.price, "price")?;
    let item = food_repo::insert(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::FoodItemNameExists),
            other => other.into(),
        })?;
    Ok(Json(item))
}

/// PUT /api/food-items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodItemUpdate>,
) -> AppResult<Json<FoodItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_money(price, "price")?;
    }
    let item = food_repo::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::FoodItemNameExists),
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::FoodItemNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(item))
}

/// POST /api/food-items/:id/stock - add or remove stock, floored at zero
pub async fn adjust_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjust>,
) -> AppResult<Json<FoodItem>> {
    let item = food_repo::adjust_stock(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::FoodItemNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(item))
}

/// DELETE /api/food-items/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !food_repo::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::FoodItemNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}
