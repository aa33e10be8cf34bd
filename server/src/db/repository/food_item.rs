//! Food Item Repository

use super::{RepoError, RepoResult};
use shared::models::{FoodItem, FoodItemCreate, FoodItemUpdate, StockAdjust, StockAdjustKind};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const FOOD_SELECT: &str =
    "SELECT id, name, price, current_stock, min_stock_level, created_at FROM food_items";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<FoodItem>> {
    let sql = format!("{} ORDER BY name", FOOD_SELECT);
    let rows = sqlx::query_as::<_, FoodItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FoodItem>> {
    let sql = format!("{} WHERE id = ?", FOOD_SELECT);
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Items at or below their restock threshold.
pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<FoodItem>> {
    let sql = format!(
        "{} WHERE current_stock <= min_stock_level ORDER BY current_stock",
        FOOD_SELECT
    );
    let rows = sqlx::query_as::<_, FoodItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn insert(pool: &SqlitePool, data: FoodItemCreate) -> RepoResult<FoodItem> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO food_items (id, name, price, current_stock, min_stock_level, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.current_stock.unwrap_or(0))
    .bind(data.min_stock_level.unwrap_or(10))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create food item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: FoodItemUpdate) -> RepoResult<FoodItem> {
    let rows = sqlx::query(
        "UPDATE food_items SET name = COALESCE(?1, name), price = COALESCE(?2, price), min_stock_level = COALESCE(?3, min_stock_level) WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.price)
    .bind(data.min_stock_level)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Food item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Food item {id} not found")))
}

/// Move stock up or down. Removals floor at zero rather than erroring.
pub async fn adjust_stock(pool: &SqlitePool, id: i64, adjust: StockAdjust) -> RepoResult<FoodItem> {
    if adjust.quantity < 0 {
        return Err(RepoError::Validation(
            "Stock adjustment quantity must not be negative".into(),
        ));
    }
    let sql = match adjust.kind {
        StockAdjustKind::Add => {
            "UPDATE food_items SET current_stock = current_stock + ?1 WHERE id = ?2"
        }
        StockAdjustKind::Remove => {
            "UPDATE food_items SET current_stock = MAX(current_stock - ?1, 0) WHERE id = ?2"
        }
    };
    let rows = sqlx::query(sql)
        .bind(adjust.quantity)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Food item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Food item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM food_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
