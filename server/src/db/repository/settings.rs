//! Settings Repository
//!
//! Plain key/value rows. Known keys live in `shared::models::setting_keys`;
//! typed accessors for the structured values sit on top of `get`.

use super::{RepoError, RepoResult};
use shared::models::{LoyaltyConfig, Setting, setting_keys};
use shared::now_millis;
use sqlx::SqlitePool;

const SETTING_SELECT: &str = "SELECT key, value, updated_at FROM settings";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Setting>> {
    let sql = format!("{} ORDER BY key", SETTING_SELECT);
    let rows = sqlx::query_as::<_, Setting>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<Setting>> {
    let sql = format!("{} WHERE key = ?", SETTING_SELECT);
    let row = sqlx::query_as::<_, Setting>(&sql)
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn put(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<Setting> {
    sqlx::query(
        "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
    )
    .bind(key)
    .bind(value)
    .bind(now_millis())
    .execute(pool)
    .await?;

    get(pool, key)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to store setting {key}")))
}

/// JSON-decoded value for `key`, when the row exists.
pub async fn get_json<T: serde::de::DeserializeOwned>(
    pool: &SqlitePool,
    key: &str,
) -> RepoResult<Option<T>> {
    match get(pool, key).await? {
        Some(row) => Ok(Some(serde_json::from_str(&row.value)?)),
        None => Ok(None),
    }
}

/// Loyalty accrual rules, falling back to the defaults when unset.
pub async fn loyalty_config(pool: &SqlitePool) -> RepoResult<LoyaltyConfig> {
    Ok(get_json(pool, setting_keys::LOYALTY_CONFIG)
        .await?
        .unwrap_or_default())
}

/// Business timezone name, when one has been stored.
pub async fn timezone_name(pool: &SqlitePool) -> RepoResult<Option<String>> {
    get_json(pool, setting_keys::TIMEZONE).await
}
