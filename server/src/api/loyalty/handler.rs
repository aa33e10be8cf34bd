//! Loyalty API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, loyalty as loyalty_repo, settings as settings_repo};
use crate::loyalty;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    LoyaltyConfig, LoyaltyMember, LoyaltyMemberUpdate, LoyaltyRedemption, LoyaltyReward,
    LoyaltyRewardCreate, LoyaltyRewardUpdate, setting_keys,
};
use shared::now_millis;

#[derive(serde::Deserialize)]
pub struct RedeemRequest {
    pub member_id: i64,
    pub reward_id: i64,
}

#[derive(serde::Deserialize)]
pub struct RedemptionQuery {
    pub member_id: Option<i64>,
}

fn validate_config(config: &LoyaltyConfig) -> AppResult<()> {
    if config.points_per_visit < 0 {
        return Err(AppError::validation("points_per_visit must not be negative"));
    }
    if !(config.silver_threshold < config.gold_threshold
        && config.gold_threshold < config.platinum_threshold)
    {
        return Err(AppError::validation(
            "Tier thresholds must be strictly increasing (silver < gold < platinum)",
        ));
    }
    for bracket in &config.brackets {
        if bracket.points < 0 {
            return Err(AppError::validation("Bracket points must not be negative"));
        }
        if let Some(max) = bracket.max
            && max < bracket.min
        {
            return Err(AppError::validation(format!(
                "Bracket [{}, {}] has max below min",
                bracket.min, max
            )));
        }
    }
    Ok(())
}

/// GET /api/loyalty/members
pub async fn list_members(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<LoyaltyMember>>> {
    let members = loyalty_repo::find_all_members(&state.pool).await?;
    Ok(Json(members))
}

/// GET /api/loyalty/members/:id
pub async fn get_member(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LoyaltyMember>> {
    let member = loyalty_repo::find_member(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound).with_detail("id", id))?;
    Ok(Json(member))
}

/// GET /api/loyalty/member/:phone - lookup by whatsapp number
pub async fn get_member_by_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<Json<LoyaltyMember>> {
    let member = loyalty_repo::find_member_by_phone(&state.pool, &phone)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound).with_detail("phone", phone))?;
    Ok(Json(member))
}

/// PUT /api/loyalty/members/:id - contact details only; balances move
/// through accrual and redemption
pub async fn update_member(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LoyaltyMemberUpdate>,
) -> AppResult<Json<LoyaltyMember>> {
    let member = loyalty_repo::update_member(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::MemberNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(member))
}

/// GET /api/loyalty/config
pub async fn get_config(State(state): State<ServerState>) -> AppResult<Json<LoyaltyConfig>> {
    let config = settings_repo::loyalty_config(&state.pool).await?;
    Ok(Json(config))
}

/// PUT /api/loyalty/config
pub async fn update_config(
    State(state): State<ServerState>,
    Json(payload): Json<LoyaltyConfig>,
) -> AppResult<Json<LoyaltyConfig>> {
    validate_config(&payload)?;
    let value = serde_json::to_string(&payload)
        .map_err(|e| AppError::with_message(ErrorCode::InternalError, e.to_string()))?;
    settings_repo::put(&state.pool, setting_keys::LOYALTY_CONFIG, &value).await?;
    tracing::info!("Loyalty config updated");
    Ok(Json(payload))
}

/// GET /api/loyalty/rewards
pub async fn list_rewards(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<LoyaltyReward>>> {
    let rewards = loyalty_repo::find_rewards(&state.pool).await?;
    Ok(Json(rewards))
}

/// POST /api/loyalty/rewards
pub async fn create_reward(
    State(state): State<ServerState>,
    Json(payload): Json<LoyaltyRewardCreate>,
) -> AppResult<Json<LoyaltyReward>> {
    if payload.point_cost < 1 {
        return Err(AppError::validation("point_cost must be at least 1"));
    }
    let reward = loyalty_repo::insert_reward(&state.pool, payload).await?;
    Ok(Json(reward))
}

/// PUT /api/loyalty/rewards/:id
pub async fn update_reward(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LoyaltyRewardUpdate>,
) -> AppResult<Json<LoyaltyReward>> {
    if payload.point_cost.is_some_and(|c| c < 1) {
        return Err(AppError::validation("point_cost must be at least 1"));
    }
    let reward = loyalty_repo::update_reward(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::RewardNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;
    Ok(Json(reward))
}

/// DELETE /api/loyalty/rewards/:id
pub async fn delete_reward(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !loyalty_repo::delete_reward(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::RewardNotFound).with_detail("id", id));
    }
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/loyalty/redeem
pub async fn redeem(
    State(state): State<ServerState>,
    Json(payload): Json<RedeemRequest>,
) -> AppResult<Json<LoyaltyRedemption>> {
    let redemption = loyalty::redeem(
        &state.pool,
        payload.member_id,
        payload.reward_id,
        now_millis(),
    )
    .await?;
    Ok(Json(redemption))
}

/// GET /api/loyalty/redemptions?member_id=
pub async fn list_redemptions(
    State(state): State<ServerState>,
    Query(query): Query<RedemptionQuery>,
) -> AppResult<Json<Vec<LoyaltyRedemption>>> {
    let redemptions = loyalty_repo::find_redemptions(&state.pool, query.member_id).await?;
    Ok(Json(redemptions))
}
