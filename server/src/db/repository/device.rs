//! Device Config Repository
//!
//! One row per category. Seat labels are derived from the count and
//! regenerated on every upsert.

use super::{RepoError, RepoResult};
use shared::models::{Category, DeviceConfig, seat_names};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const DEVICE_SELECT: &str =
    "SELECT id, category, seat_count, seats, updated_at FROM device_configs";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DeviceConfig>> {
    let sql = format!("{} ORDER BY category", DEVICE_SELECT);
    let rows = sqlx::query_as::<_, DeviceConfig>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_category(
    pool: &SqlitePool,
    category: Category,
) -> RepoResult<Option<DeviceConfig>> {
    let sql = format!("{} WHERE category = ?", DEVICE_SELECT);
    let row = sqlx::query_as::<_, DeviceConfig>(&sql)
        .bind(category)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn upsert(
    pool: &SqlitePool,
    category: Category,
    seat_count: i64,
) -> RepoResult<DeviceConfig> {
    if seat_count < 0 {
        return Err(RepoError::Validation("seat_count must not be negative".into()));
    }
    let seats = serde_json::to_string(&seat_names(category, seat_count))?;
    sqlx::query(
        "INSERT INTO device_configs (id, category, seat_count, seats, updated_at) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(category) DO UPDATE SET seat_count = ?3, seats = ?4, updated_at = ?5",
    )
    .bind(snowflake_id())
    .bind(category)
    .bind(seat_count)
    .bind(seats)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_category(pool, category)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert device config".into()))
}

pub async fn delete(pool: &SqlitePool, category: Category) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM device_configs WHERE category = ?")
        .bind(category)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
