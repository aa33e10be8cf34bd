//! Settings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono_tz::Tz;

use crate::core::ServerState;
use crate::db::repository::settings as settings_repo;
use crate::utils::time::parse_hhmm;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LoyaltyConfig, Setting, setting_keys};

#[derive(serde::Deserialize)]
pub struct SettingPut {
    pub value: serde_json::Value,
}

/// Known keys carry typed values; a bad payload must not reach the
/// schedulers that read them.
fn validate_known_key(key: &str, value: &serde_json::Value) -> AppResult<()> {
    match key {
        setting_keys::TIMEZONE => {
            let name = value
                .as_str()
                .ok_or_else(|| AppError::new(ErrorCode::InvalidTimezone))?;
            name.parse::<Tz>()
                .map_err(|_| AppError::new(ErrorCode::InvalidTimezone).with_detail("value", name))?;
        }
        setting_keys::ARCHIVE_SWEEP_TIME => {
            let hhmm = value
                .as_str()
                .ok_or_else(|| AppError::new(ErrorCode::InvalidCutoffTime))?;
            if parse_hhmm(hhmm).is_none() {
                return Err(
                    AppError::new(ErrorCode::InvalidCutoffTime).with_detail("value", hhmm)
                );
            }
        }
        setting_keys::ARCHIVE_EXPIRED => {
            if !value.is_boolean() {
                return Err(AppError::validation("archive_expired must be true or false"));
            }
        }
        setting_keys::LOYALTY_CONFIG => {
            serde_json::from_value::<LoyaltyConfig>(value.clone())
                .map_err(|e| AppError::validation(format!("Invalid loyalty config: {e}")))?;
        }
        _ => {}
    }
    Ok(())
}

/// GET /api/settings
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Setting>>> {
    let settings = settings_repo::find_all(&state.pool).await?;
    Ok(Json(settings))
}

/// GET /api/settings/:key
pub async fn get_by_key(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<Setting>> {
    let setting = settings_repo::get(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SettingNotFound).with_detail("key", key))?;
    Ok(Json(setting))
}

/// PUT /api/settings/:key - store a value and wake the schedulers that
/// depend on it
pub async fn put(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Json(payload): Json<SettingPut>,
) -> AppResult<Json<Setting>> {
    validate_known_key(&key, &payload.value)?;
    let value = payload.value.to_string();
    let setting = settings_repo::put(&state.pool, &key, &value).await?;
    state.notify_config_changed();
    tracing::info!(key = %setting.key, "Setting updated");
    Ok(Json(setting))
}
