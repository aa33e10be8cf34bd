//! Expense Repository

use super::{RepoError, RepoResult};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const EXPENSE_SELECT: &str =
    "SELECT id, category, description, amount, spent_at, created_at FROM expenses";

/// Expenses incurred in `[start, end)`, newest first.
pub async fn find_between(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<Expense>> {
    let sql = format!(
        "{} WHERE spent_at >= ? AND spent_at < ? ORDER BY spent_at DESC",
        EXPENSE_SELECT
    );
    let rows = sqlx::query_as::<_, Expense>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Expense>> {
    let sql = format!("{} WHERE id = ?", EXPENSE_SELECT);
    let row = sqlx::query_as::<_, Expense>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert(pool: &SqlitePool, data: ExpenseCreate) -> RepoResult<Expense> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO expenses (id, category, description, amount, spent_at, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.category)
    .bind(&data.description)
    .bind(data.amount)
    .bind(data.spent_at.unwrap_or(now))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create expense".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ExpenseUpdate) -> RepoResult<Expense> {
    let rows = sqlx::query(
        "UPDATE expenses SET category = COALESCE(?1, category), description = COALESCE(?2, description), amount = COALESCE(?3, amount), spent_at = COALESCE(?4, spent_at) WHERE id = ?5",
    )
    .bind(data.category)
    .bind(data.description)
    .bind(data.amount)
    .bind(data.spent_at)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Expense {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Expense {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM expenses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
