//! Booking Repository

use super::{RepoError, RepoResult};
use shared::models::{
    Booking, BookingStatus, BookingUpdate, Category, PaymentMethod, PaymentStatus,
    PromotionDetails,
};
use shared::now_millis;
use sqlx::SqlitePool;

const BOOKING_SELECT: &str = "SELECT id, booking_code, group_id, group_code, category, seat_number, seat_name, customer_name, whatsapp_number, start_time, end_time, price, original_price, status, booking_type, paused_remaining_ms, person_count, payment_method, cash_amount, upi_amount, payment_status, food_orders, promotion, credit_account_id, created_at, updated_at FROM bookings";

/// Statuses still occupying a seat.
const ACTIVE_STATUSES: &str = "('upcoming', 'running', 'paused')";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Booking>> {
    let sql = format!("{} ORDER BY created_at DESC", BOOKING_SELECT);
    let rows = sqlx::query_as::<_, Booking>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("{} WHERE id = ?", BOOKING_SELECT);
    let row = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: BookingStatus,
) -> RepoResult<Vec<Booking>> {
    let sql = format!("{} WHERE status = ? ORDER BY start_time", BOOKING_SELECT);
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Bookings still occupying a seat (upcoming, running or paused).
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Booking>> {
    let sql = format!(
        "{} WHERE status IN {} ORDER BY start_time",
        BOOKING_SELECT, ACTIVE_STATUSES
    );
    let rows = sqlx::query_as::<_, Booking>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Terminal bookings eligible for archival.
pub async fn find_archivable(
    pool: &SqlitePool,
    include_expired: bool,
) -> RepoResult<Vec<Booking>> {
    let sql = if include_expired {
        format!(
            "{} WHERE status IN ('completed', 'expired') ORDER BY end_time",
            BOOKING_SELECT
        )
    } else {
        format!("{} WHERE status = 'completed' ORDER BY end_time", BOOKING_SELECT)
    };
    let rows = sqlx::query_as::<_, Booking>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Bookings whose session started in `[start, end)`, any status, for
/// report aggregation.
pub async fn find_between(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<Booking>> {
    let sql = format!(
        "{} WHERE start_time >= ? AND start_time < ? ORDER BY start_time",
        BOOKING_SELECT
    );
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_group(pool: &SqlitePool, group_id: i64) -> RepoResult<Vec<Booking>> {
    let sql = format!(
        "{} WHERE group_id = ? ORDER BY seat_number",
        BOOKING_SELECT
    );
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(group_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// First active booking whose window overlaps `[start, end)` on the same
/// seat. Touching endpoints do not collide, so back-to-back sessions are
/// allowed.
pub async fn find_seat_conflict(
    pool: &SqlitePool,
    category: Category,
    seat_number: i64,
    start: i64,
    end: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Option<Booking>> {
    let sql = format!(
        "{} WHERE category = ? AND seat_number = ? AND status IN {} AND start_time < ? AND end_time > ? AND id != ? LIMIT 1",
        BOOKING_SELECT, ACTIVE_STATUSES
    );
    let row = sqlx::query_as::<_, Booking>(&sql)
        .bind(category)
        .bind(seat_number)
        .bind(end)
        .bind(start)
        .bind(exclude_id.unwrap_or(0))
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a fully assembled booking row.
pub async fn insert(pool: &SqlitePool, booking: &Booking) -> RepoResult<Booking> {
    sqlx::query(
        "INSERT INTO bookings (id, booking_code, group_id, group_code, category, seat_number, seat_name, customer_name, whatsapp_number, start_time, end_time, price, original_price, status, booking_type, paused_remaining_ms, person_count, payment_method, cash_amount, upi_amount, payment_status, food_orders, promotion, credit_account_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(booking.id)
    .bind(&booking.booking_code)
    .bind(booking.group_id)
    .bind(&booking.group_code)
    .bind(booking.category)
    .bind(booking.seat_number)
    .bind(&booking.seat_name)
    .bind(&booking.customer_name)
    .bind(&booking.whatsapp_number)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(booking.price)
    .bind(booking.original_price)
    .bind(booking.status)
    .bind(booking.booking_type)
    .bind(booking.paused_remaining_ms)
    .bind(booking.person_count)
    .bind(booking.payment_method)
    .bind(booking.cash_amount)
    .bind(booking.upi_amount)
    .bind(booking.payment_status)
    .bind(serde_json::to_string(&booking.food_orders)?)
    .bind(serde_json::to_string(&booking.promotion)?)
    .bind(booking.credit_account_id)
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .execute(pool)
    .await?;

    find_by_id(pool, booking.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

/// Partial update of customer-editable fields. `seat_name` travels with
/// `seat_number`; the service derives it from the category prefix.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: BookingUpdate,
    seat_name: Option<&str>,
) -> RepoResult<Booking> {
    let now = now_millis();
    let food_orders = data
        .food_orders
        .map(|f| serde_json::to_string(&f))
        .transpose()?;

    let rows = sqlx::query(
        "UPDATE bookings SET customer_name = COALESCE(?1, customer_name), whatsapp_number = COALESCE(?2, whatsapp_number), seat_number = COALESCE(?3, seat_number), seat_name = COALESCE(?4, seat_name), food_orders = COALESCE(?5, food_orders), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.customer_name)
    .bind(data.whatsapp_number)
    .bind(data.seat_number)
    .bind(seat_name)
    .bind(food_orders)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

/// Sweep pass: promote due `upcoming` rows to `running`, then expire due
/// `running` rows. Each UPDATE is guarded by the current status, so running
/// the sweep twice with the same `now` changes nothing.
pub async fn sweep_transitions(pool: &SqlitePool, now: i64) -> RepoResult<(u64, u64)> {
    let started = sqlx::query(
        "UPDATE bookings SET status = 'running', updated_at = ?1 WHERE status = 'upcoming' AND start_time <= ?1",
    )
    .bind(now)
    .execute(pool)
    .await?
    .rows_affected();

    let expired = sqlx::query(
        "UPDATE bookings SET status = 'expired', updated_at = ?1 WHERE status = 'running' AND end_time <= ?1",
    )
    .bind(now)
    .execute(pool)
    .await?
    .rows_affected();

    Ok((started, expired))
}

/// Freeze the clock: stash the remaining time and flip to `paused`.
pub async fn mark_paused(
    pool: &SqlitePool,
    id: i64,
    remaining_ms: i64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE bookings SET status = 'paused', paused_remaining_ms = ?1, updated_at = ?2 WHERE id = ?3 AND status = 'running'",
    )
    .bind(remaining_ms)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Restart the clock with a recomputed end time.
pub async fn mark_resumed(
    pool: &SqlitePool,
    id: i64,
    end_time: i64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE bookings SET status = 'running', end_time = ?1, paused_remaining_ms = NULL, updated_at = ?2 WHERE id = ?3 AND status = 'paused'",
    )
    .bind(end_time)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Apply an extension: new end time plus repriced totals.
pub async fn apply_extension(
    pool: &SqlitePool,
    id: i64,
    end_time: i64,
    price: f64,
    original_price: f64,
    promotion: &Option<PromotionDetails>,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE bookings SET end_time = ?1, price = ?2, original_price = ?3, promotion = ?4, updated_at = ?5 WHERE id = ?6 AND status IN ('upcoming', 'running', 'paused')",
    )
    .bind(end_time)
    .bind(price)
    .bind(original_price)
    .bind(serde_json::to_string(promotion)?)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Complete with payment details; allowed from `running` or `expired`.
#[allow(clippy::too_many_arguments)]
pub async fn mark_completed(
    pool: &SqlitePool,
    id: i64,
    payment_method: PaymentMethod,
    cash_amount: Option<f64>,
    upi_amount: Option<f64>,
    payment_status: PaymentStatus,
    credit_account_id: Option<i64>,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE bookings SET status = 'completed', end_time = MIN(end_time, ?1), payment_method = ?2, cash_amount = ?3, upi_amount = ?4, payment_status = ?5, credit_account_id = ?6, updated_at = ?1 WHERE id = ?7 AND status IN ('running', 'expired')",
    )
    .bind(now)
    .bind(payment_method)
    .bind(cash_amount)
    .bind(upi_amount)
    .bind(payment_status)
    .bind(credit_account_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Link the credit account charged for this booking's shortfall.
pub async fn set_credit_account(
    pool: &SqlitePool,
    id: i64,
    credit_account_id: i64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE bookings SET credit_account_id = ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(credit_account_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Hard delete (staff cancel). Terminal rows go through archival instead.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
