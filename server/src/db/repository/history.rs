//! Booking History Repository
//!
//! Terminal bookings are moved here by the archiver. Each move is one
//! transaction: insert the snapshot, delete the active row. A failure
//! leaves the booking in the active table untouched.

use super::{RepoError, RepoResult};
use shared::models::BookingHistory;
use shared::snowflake_id;
use sqlx::SqlitePool;

const HISTORY_SELECT: &str = "SELECT id, booking_id, booking_code, group_id, group_code, category, seat_number, seat_name, customer_name, whatsapp_number, start_time, end_time, price, original_price, status, booking_type, paused_remaining_ms, person_count, payment_method, cash_amount, upi_amount, payment_status, food_orders, promotion, credit_account_id, created_at, archived_at FROM booking_history";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BookingHistory>> {
    let sql = format!("{} WHERE id = ?", HISTORY_SELECT);
    let row = sqlx::query_as::<_, BookingHistory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Page of archived bookings whose session started in `[start, end)`,
/// newest first. `search` matches customer name, whatsapp number or
/// booking code.
pub async fn find_page(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<BookingHistory>> {
    let sql = format!(
        "{} WHERE start_time >= ?1 AND start_time < ?2 AND (?3 IS NULL OR customer_name LIKE '%' || ?3 || '%' OR whatsapp_number LIKE '%' || ?3 || '%' OR booking_code LIKE '%' || ?3 || '%') ORDER BY archived_at DESC LIMIT ?4 OFFSET ?5",
        HISTORY_SELECT
    );
    let rows = sqlx::query_as::<_, BookingHistory>(&sql)
        .bind(start)
        .bind(end)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    search: Option<&str>,
) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM booking_history WHERE start_time >= ?1 AND start_time < ?2 AND (?3 IS NULL OR customer_name LIKE '%' || ?3 || '%' OR whatsapp_number LIKE '%' || ?3 || '%' OR booking_code LIKE '%' || ?3 || '%')",
    )
    .bind(start)
    .bind(end)
    .bind(search)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Archived bookings whose session started in `[start, end)`, for report
/// aggregation.
pub async fn find_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<BookingHistory>> {
    let sql = format!(
        "{} WHERE start_time >= ?1 AND start_time < ?2 ORDER BY start_time",
        HISTORY_SELECT
    );
    let rows = sqlx::query_as::<_, BookingHistory>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Move one booking into history: snapshot insert plus active-row delete
/// in a single transaction. Returns the new history id.
pub async fn archive_booking(
    pool: &SqlitePool,
    booking_id: i64,
    archived_at: i64,
) -> RepoResult<i64> {
    let history_id = snowflake_id();
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO booking_history (id, booking_id, booking_code, group_id, group_code, category, seat_number, seat_name, customer_name, whatsapp_number, start_time, end_time, price, original_price, status, booking_type, paused_remaining_ms, person_count, payment_method, cash_amount, upi_amount, payment_status, food_orders, promotion, credit_account_id, created_at, archived_at) SELECT ?1, id, booking_code, group_id, group_code, category, seat_number, seat_name, customer_name, whatsapp_number, start_time, end_time, price, original_price, status, booking_type, paused_remaining_ms, person_count, payment_method, cash_amount, upi_amount, payment_status, food_orders, promotion, credit_account_id, created_at, ?2 FROM bookings WHERE id = ?3 AND status IN ('completed', 'expired')",
    )
    .bind(history_id)
    .bind(archived_at)
    .bind(booking_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted == 0 {
        // Gone already, or still active. Either way nothing to move.
        tx.rollback().await?;
        return Err(RepoError::NotFound(format!(
            "Booking {booking_id} not found or not terminal"
        )));
    }

    sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(history_id)
}
