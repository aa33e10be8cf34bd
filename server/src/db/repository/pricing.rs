//! Pricing Repository
//!
//! The regular and happy-hours price tables share one row shape, so most
//! functions take a [`Tariff`] to pick the table. Multi-person rows are a
//! PS5-only concept and every write path enforces that here.

use super::{RepoError, RepoResult};
use shared::models::{
    Category, HappyHoursWindow, HappyHoursWindowCreate, HappyHoursWindowUpdate, PricingConfig,
    PricingConfigCreate, PricingConfigUpdate, Tariff,
};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const WINDOW_SELECT: &str =
    "SELECT id, category, start_time, end_time, enabled, created_at FROM happy_hours_configs";

fn table_name(tariff: Tariff) -> &'static str {
    match tariff {
        Tariff::Regular => "pricing_configs",
        Tariff::HappyHours => "happy_hours_pricing",
    }
}

fn price_select(tariff: Tariff) -> String {
    format!(
        "SELECT id, category, duration, person_count, price, created_at FROM {}",
        table_name(tariff)
    )
}

/// Multi-person pricing exists only for PS5.
pub fn ensure_person_count_rule(category: Category, person_count: i64) -> RepoResult<()> {
    if person_count < 1 {
        return Err(RepoError::Validation(
            "person_count must be at least 1".into(),
        ));
    }
    if person_count > 1 && !category.allows_multi_person() {
        return Err(RepoError::Validation(format!(
            "person_count > 1 is not supported for {category:?} pricing"
        )));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool, tariff: Tariff) -> RepoResult<Vec<PricingConfig>> {
    let sql = format!(
        "{} ORDER BY category, person_count, duration",
        price_select(tariff)
    );
    let rows = sqlx::query_as::<_, PricingConfig>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_category(
    pool: &SqlitePool,
    tariff: Tariff,
    category: Category,
) -> RepoResult<Vec<PricingConfig>> {
    let sql = format!(
        "{} WHERE category = ? ORDER BY person_count, duration",
        price_select(tariff)
    );
    let rows = sqlx::query_as::<_, PricingConfig>(&sql)
        .bind(category)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Exact key lookup: (category, duration label, person count).
pub async fn find_price(
    pool: &SqlitePool,
    tariff: Tariff,
    category: Category,
    duration: &str,
    person_count: i64,
) -> RepoResult<Option<PricingConfig>> {
    let sql = format!(
        "{} WHERE category = ? AND duration = ? AND person_count = ?",
        price_select(tariff)
    );
    let row = sqlx::query_as::<_, PricingConfig>(&sql)
        .bind(category)
        .bind(duration)
        .bind(person_count)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn find_price_by_id(
    pool: &SqlitePool,
    tariff: Tariff,
    id: i64,
) -> RepoResult<Option<PricingConfig>> {
    let sql = format!("{} WHERE id = ?", price_select(tariff));
    let row = sqlx::query_as::<_, PricingConfig>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_price(
    pool: &SqlitePool,
    tariff: Tariff,
    data: PricingConfigCreate,
) -> RepoResult<PricingConfig> {
    let person_count = data.person_count.unwrap_or(1);
    ensure_person_count_rule(data.category, person_count)?;

    let id = snowflake_id();
    let sql = format!(
        "INSERT INTO {} (id, category, duration, person_count, price, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        table_name(tariff)
    );
    sqlx::query(&sql)
        .bind(id)
        .bind(data.category)
        .bind(&data.duration)
        .bind(person_count)
        .bind(data.price)
        .bind(now_millis())
        .execute(pool)
        .await?;

    find_price_by_id(pool, tariff, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create price row".into()))
}

pub async fn update_price(
    pool: &SqlitePool,
    tariff: Tariff,
    id: i64,
    data: PricingConfigUpdate,
) -> RepoResult<PricingConfig> {
    let existing = find_price_by_id(pool, tariff, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Price row {id} not found")))?;
    ensure_person_count_rule(
        existing.category,
        data.person_count.unwrap_or(existing.person_count),
    )?;

    let sql = format!(
        "UPDATE {} SET duration = COALESCE(?1, duration), person_count = COALESCE(?2, person_count), price = COALESCE(?3, price) WHERE id = ?4",
        table_name(tariff)
    );
    sqlx::query(&sql)
        .bind(data.duration)
        .bind(data.person_count)
        .bind(data.price)
        .bind(id)
        .execute(pool)
        .await?;

    find_price_by_id(pool, tariff, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Price row {id} not found")))
}

pub async fn delete_price(pool: &SqlitePool, tariff: Tariff, id: i64) -> RepoResult<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?", table_name(tariff));
    let rows = sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(rows.rows_affected() > 0)
}

/// Drop every price row of one category. Returns how many went.
pub async fn delete_category(
    pool: &SqlitePool,
    tariff: Tariff,
    category: Category,
) -> RepoResult<u64> {
    let sql = format!("DELETE FROM {} WHERE category = ?", table_name(tariff));
    let rows = sqlx::query(&sql).bind(category).execute(pool).await?;
    Ok(rows.rows_affected())
}

/// Swap out one category's rows for a new set, atomically.
pub async fn replace_category(
    pool: &SqlitePool,
    tariff: Tariff,
    category: Category,
    rows: Vec<PricingConfigCreate>,
) -> RepoResult<Vec<PricingConfig>> {
    for row in &rows {
        if row.category != category {
            return Err(RepoError::Validation(
                "All rows must belong to the category being replaced".into(),
            ));
        }
        ensure_person_count_rule(row.category, row.person_count.unwrap_or(1))?;
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let delete_sql = format!("DELETE FROM {} WHERE category = ?", table_name(tariff));
    sqlx::query(&delete_sql)
        .bind(category)
        .execute(&mut *tx)
        .await?;

    let insert_sql = format!(
        "INSERT INTO {} (id, category, duration, person_count, price, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        table_name(tariff)
    );
    for row in &rows {
        sqlx::query(&insert_sql)
            .bind(snowflake_id())
            .bind(row.category)
            .bind(&row.duration)
            .bind(row.person_count.unwrap_or(1))
            .bind(row.price)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    find_by_category(pool, tariff, category).await
}

pub async fn find_windows(pool: &SqlitePool) -> RepoResult<Vec<HappyHoursWindow>> {
    let sql = format!("{} ORDER BY category", WINDOW_SELECT);
    let rows = sqlx::query_as::<_, HappyHoursWindow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// The (single) window configured for a category, enabled or not.
pub async fn find_window(
    pool: &SqlitePool,
    category: Category,
) -> RepoResult<Option<HappyHoursWindow>> {
    let sql = format!("{} WHERE category = ?", WINDOW_SELECT);
    let row = sqlx::query_as::<_, HappyHoursWindow>(&sql)
        .bind(category)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn find_window_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<HappyHoursWindow>> {
    let sql = format!("{} WHERE id = ?", WINDOW_SELECT);
    let row = sqlx::query_as::<_, HappyHoursWindow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_window(
    pool: &SqlitePool,
    data: HappyHoursWindowCreate,
) -> RepoResult<HappyHoursWindow> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO happy_hours_configs (id, category, start_time, end_time, enabled, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.category)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(data.enabled.unwrap_or(true))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_window_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create happy-hours window".into()))
}

pub async fn update_window(
    pool: &SqlitePool,
    id: i64,
    data: HappyHoursWindowUpdate,
) -> RepoResult<HappyHoursWindow> {
    let rows = sqlx::query(
        "UPDATE happy_hours_configs SET start_time = COALESCE(?1, start_time), end_time = COALESCE(?2, end_time), enabled = COALESCE(?3, enabled) WHERE id = ?4",
    )
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.enabled)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Happy-hours window {id} not found"
        )));
    }
    find_window_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Happy-hours window {id} not found")))
}

pub async fn delete_window(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM happy_hours_configs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
