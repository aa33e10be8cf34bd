//! Session Group Repository

use super::{RepoError, RepoResult};
use shared::models::SessionGroup;
use sqlx::SqlitePool;

const GROUP_SELECT: &str =
    "SELECT id, group_code, group_name, category, booking_type, created_at FROM session_groups";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SessionGroup>> {
    let sql = format!("{} ORDER BY created_at DESC", GROUP_SELECT);
    let rows = sqlx::query_as::<_, SessionGroup>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SessionGroup>> {
    let sql = format!("{} WHERE id = ?", GROUP_SELECT);
    let row = sqlx::query_as::<_, SessionGroup>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert(pool: &SqlitePool, group: &SessionGroup) -> RepoResult<SessionGroup> {
    sqlx::query(
        "INSERT INTO session_groups (id, group_code, group_name, category, booking_type, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(group.id)
    .bind(&group.group_code)
    .bind(&group.group_name)
    .bind(group.category)
    .bind(group.booking_type)
    .bind(group.created_at)
    .execute(pool)
    .await?;

    find_by_id(pool, group.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create session group".into()))
}

/// Remove a group once its last booking is gone.
pub async fn delete_if_empty(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM session_groups WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM bookings WHERE group_id = ?1)",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
