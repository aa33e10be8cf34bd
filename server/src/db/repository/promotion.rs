//! Promotion Repository
//!
//! One table holds both promotion kinds. The unique index keeps a kind to
//! one row per (category, duration, person_count); the overlap check below
//! keeps the two kinds from being live on the same key at the same time.

use super::{RepoError, RepoResult};
use shared::models::{
    Category, Promotion, PromotionCreate, PromotionDetails, PromotionKind, PromotionUpdate,
};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const PROMOTION_SELECT: &str = "SELECT id, kind, category, duration, person_count, value, start_date, end_date, enabled, usage_count, total_savings, total_hours_given, created_at, updated_at FROM promotions";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Promotion>> {
    let sql = format!("{} ORDER BY created_at DESC", PROMOTION_SELECT);
    let rows = sqlx::query_as::<_, Promotion>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_kind(pool: &SqlitePool, kind: PromotionKind) -> RepoResult<Vec<Promotion>> {
    let sql = format!("{} WHERE kind = ? ORDER BY created_at DESC", PROMOTION_SELECT);
    let rows = sqlx::query_as::<_, Promotion>(&sql)
        .bind(kind)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Promotion>> {
    let sql = format!("{} WHERE id = ?", PROMOTION_SELECT);
    let row = sqlx::query_as::<_, Promotion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Enabled promotions for an exact pricing key, either kind. Date
/// validity is the caller's business.
pub async fn find_enabled_for_key(
    pool: &SqlitePool,
    category: Category,
    duration: &str,
    person_count: i64,
) -> RepoResult<Vec<Promotion>> {
    let sql = format!(
        "{} WHERE category = ? AND duration = ? AND person_count = ? AND enabled = 1",
        PROMOTION_SELECT
    );
    let rows = sqlx::query_as::<_, Promotion>(&sql)
        .bind(category)
        .bind(duration)
        .bind(person_count)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// An enabled promotion of the opposite kind whose validity window
/// overlaps `[start_date, end_date]` on the same key, if any.
async fn find_kind_conflict(
    pool: &SqlitePool,
    kind: PromotionKind,
    category: Category,
    duration: &str,
    person_count: i64,
    start_date: i64,
    end_date: i64,
) -> RepoResult<Option<Promotion>> {
    let sql = format!(
        "{} WHERE kind != ? AND category = ? AND duration = ? AND person_count = ? AND enabled = 1 AND start_date <= ? AND end_date >= ? LIMIT 1",
        PROMOTION_SELECT
    );
    let row = sqlx::query_as::<_, Promotion>(&sql)
        .bind(kind)
        .bind(category)
        .bind(duration)
        .bind(person_count)
        .bind(end_date)
        .bind(start_date)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert(pool: &SqlitePool, data: PromotionCreate) -> RepoResult<Promotion> {
    let person_count = data.person_count.unwrap_or(1);
    let enabled = data.enabled.unwrap_or(true);
    if data.end_date < data.start_date {
        return Err(RepoError::Validation(
            "end_date must not precede start_date".into(),
        ));
    }

    if enabled
        && let Some(other) = find_kind_conflict(
            pool,
            data.kind,
            data.category,
            &data.duration,
            person_count,
            data.start_date,
            data.end_date,
        )
        .await?
    {
        return Err(RepoError::Duplicate(format!(
            "A {:?} promotion (id {}) already covers this key in that date range",
            other.kind, other.id
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO promotions (id, kind, category, duration, person_count, value, start_date, end_date, enabled, usage_count, total_savings, total_hours_given, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?, ?)",
    )
    .bind(id)
    .bind(data.kind)
    .bind(data.category)
    .bind(&data.duration)
    .bind(person_count)
    .bind(data.value)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(enabled)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create promotion".into()))
}

/// Partial update. Counters are append-only and not reachable from here.
pub async fn update(pool: &SqlitePool, id: i64, data: PromotionUpdate) -> RepoResult<Promotion> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Promotion {id} not found")))?;

    let start_date = data.start_date.unwrap_or(existing.start_date);
    let end_date = data.end_date.unwrap_or(existing.end_date);
    let enabled = data.enabled.unwrap_or(existing.enabled);
    if end_date < start_date {
        return Err(RepoError::Validation(
            "end_date must not precede start_date".into(),
        ));
    }

    if enabled
        && let Some(other) = find_kind_conflict(
            pool,
            existing.kind,
            existing.category,
            &existing.duration,
            existing.person_count,
            start_date,
            end_date,
        )
        .await?
    {
        return Err(RepoError::Duplicate(format!(
            "A {:?} promotion (id {}) already covers this key in that date range",
            other.kind, other.id
        )));
    }

    sqlx::query(
        "UPDATE promotions SET value = COALESCE(?1, value), start_date = ?2, end_date = ?3, enabled = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.value)
    .bind(start_date)
    .bind(end_date)
    .bind(enabled)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Promotion {id} not found")))
}

/// Bump usage counters for an applied promotion. The counters only ever
/// grow. Returns 0 when the promotion has been deleted since.
pub async fn record_usage(pool: &SqlitePool, details: &PromotionDetails) -> RepoResult<u64> {
    let rows = match details {
        PromotionDetails::Discount {
            promotion_id,
            amount_saved,
            ..
        } => {
            sqlx::query(
                "UPDATE promotions SET usage_count = usage_count + 1, total_savings = total_savings + ?1, updated_at = ?2 WHERE id = ?3",
            )
            .bind(amount_saved)
            .bind(now_millis())
            .bind(promotion_id)
            .execute(pool)
            .await?
        }
        PromotionDetails::BonusHours { promotion_id, hours } => {
            sqlx::query(
                "UPDATE promotions SET usage_count = usage_count + 1, total_hours_given = total_hours_given + ?1, updated_at = ?2 WHERE id = ?3",
            )
            .bind(hours)
            .bind(now_millis())
            .bind(promotion_id)
            .execute(pool)
            .await?
        }
    };
    Ok(rows.rows_affected())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM promotions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
