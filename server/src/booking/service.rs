//! Booking Service
//!
//! Everything that mutates a booking goes through here: creation (single
//! and group), edits, the pause/resume/extend/complete actions and
//! deletion. Handlers pass the clock in; nothing below this layer calls it.

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::booking::{duration, status};
use crate::db::repository::{
    booking as booking_repo, credit as credit_repo, device as device_repo,
    food_item as food_repo, group as group_repo, promotion as promotion_repo,
};
use crate::loyalty;
use crate::pricing::resolver;
use crate::utils::money::{MONEY_TOLERANCE, amounts_equal, round2};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Booking, BookingComplete, BookingCreate, BookingExtend, BookingStatus, BookingType,
    BookingUpdate, Category, FoodOrderLine, GroupCreate, PaymentMethod, PaymentStatus, PriceQuote,
    QuoteRequest, SessionGroup, Tariff,
};
use shared::{generate_code, snowflake_id};

const MS_PER_MINUTE: i64 = 60_000;

/// Parse a duration label or fail with the typed error.
fn minutes_for_label(label: &str) -> AppResult<i64> {
    duration::label_to_minutes(label).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidDuration,
            format!("Unrecognized duration \"{label}\""),
        )
    })
}

/// Seat number must exist in the category's device config, when one is set.
async fn validate_seat(pool: &SqlitePool, category: Category, seat_number: i64) -> AppResult<()> {
    if seat_number < 1 {
        return Err(AppError::validation("seat_number must be at least 1"));
    }
    if let Some(config) = device_repo::find_by_category(pool, category).await?
        && seat_number > config.seat_count
    {
        return Err(AppError::validation(format!(
            "Seat {seat_number} does not exist; {category} has {} seats",
            config.seat_count
        )));
    }
    Ok(())
}

/// Rebuild food lines from the catalog so the stored prices are ours, not
/// the client's.
async fn reprice_food(
    pool: &SqlitePool,
    lines: Vec<FoodOrderLine>,
) -> AppResult<Vec<FoodOrderLine>> {
    let mut repriced = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity < 1 {
            return Err(AppError::validation("Food order quantity must be at least 1"));
        }
        let item = food_repo::find_by_id(pool, line.food_item_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::FoodItemNotFound)
                    .with_detail("food_item_id", line.food_item_id)
            })?;
        repriced.push(FoodOrderLine {
            food_item_id: item.id,
            name: item.name,
            price: item.price,
            quantity: line.quantity,
        });
    }
    Ok(repriced)
}

/// Quote, conflict-check and assemble one booking row. Shared between the
/// single and group create paths; the caller inserts.
async fn assemble_booking(
    pool: &SqlitePool,
    tz: Tz,
    data: BookingCreate,
    group: Option<&SessionGroup>,
    now: i64,
) -> AppResult<(Booking, PriceQuote)> {
    validate_required_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
    if let Some(number) = &data.whatsapp_number {
        validate_required_text(number, "whatsapp_number", MAX_SHORT_TEXT_LEN)?;
    }
    validate_seat(pool, data.category, data.seat_number).await?;

    let minutes = minutes_for_label(&data.duration)?;
    let start = data.start_time.unwrap_or(now);
    if start < now - MS_PER_MINUTE {
        return Err(AppError::validation("start_time is in the past"));
    }

    // Advance bookings are priced for their slot, not for the moment the
    // staff types them in.
    let quote = resolver::quote(
        pool,
        tz,
        &QuoteRequest {
            category: data.category,
            duration: data.duration.clone(),
            person_count: data.person_count,
            at: Some(start),
            skip_promotion: data.skip_promotion,
        },
        now,
    )
    .await?;

    let end = start + (minutes + quote.bonus_minutes) * MS_PER_MINUTE;
    if let Some(conflict) =
        booking_repo::find_seat_conflict(pool, data.category, data.seat_number, start, end, None)
            .await?
    {
        return Err(AppError::seat_occupied(conflict.seat_name));
    }

    let food_orders = match data.food_orders {
        Some(lines) => reprice_food(pool, lines).await?,
        None => Vec::new(),
    };

    let booking_type = if quote.tariff == Tariff::HappyHours {
        BookingType::HappyHour
    } else if start > now {
        BookingType::Advance
    } else {
        BookingType::WalkIn
    };

    let booking = Booking {
        id: snowflake_id(),
        booking_code: generate_code("BK"),
        group_id: group.map(|g| g.id),
        group_code: group.map(|g| g.group_code.clone()),
        category: data.category,
        seat_number: data.seat_number,
        seat_name: format!("{}-{}", data.category.seat_prefix(), data.seat_number),
        customer_name: data.customer_name.trim().to_string(),
        whatsapp_number: data.whatsapp_number,
        start_time: start,
        end_time: end,
        price: quote.final_price,
        original_price: quote.base_price,
        status: status::compute_status(BookingStatus::Upcoming, start, end, now),
        booking_type,
        paused_remaining_ms: None,
        person_count: quote.person_count,
        payment_method: None,
        cash_amount: None,
        upi_amount: None,
        payment_status: PaymentStatus::Unpaid,
        food_orders,
        promotion: quote.promotion.clone(),
        credit_account_id: None,
        created_at: now,
        updated_at: now,
    };
    Ok((booking, quote))
}

/// Record promotion usage for an applied quote, tolerating a promotion
/// deleted between quoting and commit.
async fn note_promotion_usage(pool: &SqlitePool, quote: &PriceQuote) -> AppResult<()> {
    if let Some(details) = &quote.promotion
        && promotion_repo::record_usage(pool, details).await? == 0
    {
        tracing::warn!(
            "Promotion {} vanished before its usage could be counted",
            details.promotion_id()
        );
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, tz: Tz, data: BookingCreate, now: i64) -> AppResult<Booking> {
    let (booking, quote) = assemble_booking(pool, tz, data, None, now).await?;
    let created = booking_repo::insert(pool, &booking).await?;
    note_promotion_usage(pool, &quote).await?;
    tracing::info!(
        "Booking {} created: {} seat {} ({:?}, ₹{:.2})",
        created.booking_code,
        created.category,
        created.seat_number,
        created.booking_type,
        created.price
    );
    Ok(created)
}

/// Book several seats of one category under a shared group code.
pub async fn create_group(
    pool: &SqlitePool,
    tz: Tz,
    data: GroupCreate,
    now: i64,
) -> AppResult<(SessionGroup, Vec<Booking>)> {
    validate_required_text(&data.group_name, "group_name", MAX_NAME_LEN)?;
    let Some(first) = data.bookings.first() else {
        return Err(AppError::validation("A group needs at least one booking"));
    };
    let category = first.category;
    if data.bookings.iter().any(|b| b.category != category) {
        return Err(AppError::validation(
            "All bookings in a group must share one category",
        ));
    }

    let group = SessionGroup {
        id: snowflake_id(),
        group_code: generate_code("GRP"),
        group_name: data.group_name.trim().to_string(),
        category,
        booking_type: BookingType::WalkIn,
        created_at: now,
    };

    // Assemble every member first so one bad seat rejects the whole group
    // before anything is written.
    let mut assembled = Vec::with_capacity(data.bookings.len());
    for payload in data.bookings {
        let (booking, quote) = assemble_booking(pool, tz, payload, Some(&group), now).await?;
        for (other, _) in &assembled {
            let other: &Booking = other;
            if other.seat_number == booking.seat_number
                && booking.start_time < other.end_time
                && booking.end_time > other.start_time
            {
                return Err(AppError::seat_occupied(booking.seat_name.clone()));
            }
        }
        assembled.push((booking, quote));
    }

    let group = group_repo::insert(
        pool,
        &SessionGroup {
            booking_type: assembled[0].0.booking_type,
            ..group
        },
    )
    .await?;

    let mut bookings = Vec::with_capacity(assembled.len());
    for (booking, quote) in assembled {
        let created = booking_repo::insert(pool, &booking).await?;
        note_promotion_usage(pool, &quote).await?;
        bookings.push(created);
    }
    tracing::info!(
        "Group {} created with {} {} seats",
        group.group_code,
        bookings.len(),
        group.category
    );
    Ok((group, bookings))
}

async fn load(pool: &SqlitePool, id: i64) -> AppResult<Booking> {
    booking_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).with_detail("id", id))
}

/// Overlay the automatic transitions on a loaded row without writing.
///
/// Reads stay exact between sweeps; the sweeper persists the same
/// transition shortly after.
pub fn with_current_status(mut booking: Booking, now: i64) -> Booking {
    booking.status =
        status::compute_status(booking.status, booking.start_time, booking.end_time, now);
    booking
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    mut data: BookingUpdate,
    now: i64,
) -> AppResult<Booking> {
    let booking = load(pool, id).await?;
    if booking.status.is_terminal() {
        return Err(AppError::new(ErrorCode::BookingAlreadyFinished));
    }
    if let Some(name) = &data.customer_name {
        validate_required_text(name, "customer_name", MAX_NAME_LEN)?;
    }
    if let Some(number) = &data.whatsapp_number {
        validate_required_text(number, "whatsapp_number", MAX_SHORT_TEXT_LEN)?;
    }

    if let Some(seat_number) = data.seat_number
        && seat_number != booking.seat_number
    {
        validate_seat(pool, booking.category, seat_number).await?;
        if let Some(conflict) = booking_repo::find_seat_conflict(
            pool,
            booking.category,
            seat_number,
            booking.start_time,
            booking.end_time,
            Some(booking.id),
        )
        .await?
        {
            return Err(AppError::seat_occupied(conflict.seat_name));
        }
    }

    if let Some(lines) = data.food_orders.take() {
        data.food_orders = Some(reprice_food(pool, lines).await?);
    }

    let seat_name = data
        .seat_number
        .map(|n| format!("{}-{}", booking.category.seat_prefix(), n));
    Ok(booking_repo::update(pool, id, data, seat_name.as_deref()).await?)
}

/// Freeze a running session, banking the time left on the clock.
pub async fn pause(pool: &SqlitePool, id: i64, now: i64) -> AppResult<Booking> {
    let booking = load(pool, id).await?;
    let effective =
        status::compute_status(booking.status, booking.start_time, booking.end_time, now);
    if effective != BookingStatus::Running {
        return Err(AppError::new(ErrorCode::BookingNotRunning));
    }

    let remaining = booking.end_time - now;
    if booking_repo::mark_paused(pool, id, remaining, now).await? == 0 {
        return Err(AppError::new(ErrorCode::BookingNotRunning));
    }
    load(pool, id).await
}

/// Resume a paused session; the end time restarts from now.
pub async fn resume(pool: &SqlitePool, id: i64, now: i64) -> AppResult<Booking> {
    let booking = load(pool, id).await?;
    if booking.status != BookingStatus::Paused {
        return Err(AppError::new(ErrorCode::BookingNotPaused));
    }

    let end_time = now + booking.paused_remaining_ms.unwrap_or(0).max(0);
    if booking_repo::mark_resumed(pool, id, end_time, now).await? == 0 {
        return Err(AppError::new(ErrorCode::BookingNotPaused));
    }
    load(pool, id).await
}

/// Add another duration to an active session, priced at whatever tariff
/// is in effect right now.
pub async fn extend(
    pool: &SqlitePool,
    tz: Tz,
    id: i64,
    data: BookingExtend,
    now: i64,
) -> AppResult<Booking> {
    let booking = load(pool, id).await?;
    let effective =
        status::compute_status(booking.status, booking.start_time, booking.end_time, now);
    if effective.is_terminal() {
        return Err(AppError::new(ErrorCode::BookingAlreadyFinished));
    }

    let minutes = minutes_for_label(&data.duration)?;
    let quote = resolver::quote(
        pool,
        tz,
        &QuoteRequest {
            category: booking.category,
            duration: data.duration.clone(),
            person_count: Some(booking.person_count),
            at: None,
            skip_promotion: data.skip_promotion,
        },
        now,
    )
    .await?;

    let new_end = booking.end_time + (minutes + quote.bonus_minutes) * MS_PER_MINUTE;
    if let Some(conflict) = booking_repo::find_seat_conflict(
        pool,
        booking.category,
        booking.seat_number,
        booking.end_time,
        new_end,
        Some(booking.id),
    )
    .await?
    {
        return Err(AppError::seat_occupied(conflict.seat_name));
    }

    // The first applied promotion keeps the stored slot; later ones are
    // still counted and folded into the price.
    let promotion = booking.promotion.clone().or_else(|| quote.promotion.clone());
    let price = round2(booking.price + quote.final_price);
    let original_price = round2(booking.original_price + quote.base_price);
    if booking_repo::apply_extension(pool, id, new_end, price, original_price, &promotion, now)
        .await?
        == 0
    {
        return Err(AppError::new(ErrorCode::BookingAlreadyFinished));
    }
    note_promotion_usage(pool, &quote).await?;

    tracing::info!(
        "Booking {} extended by {} (₹{:.2} at {:?} tariff)",
        booking.booking_code,
        data.duration,
        quote.final_price,
        quote.tariff
    );
    load(pool, id).await
}

/// Settle the bill and close the session.
pub async fn complete(
    pool: &SqlitePool,
    id: i64,
    data: BookingComplete,
    now: i64,
) -> AppResult<Booking> {
    let booking = load(pool, id).await?;
    let effective =
        status::compute_status(booking.status, booking.start_time, booking.end_time, now);
    match effective {
        BookingStatus::Running | BookingStatus::Expired => {}
        BookingStatus::Paused => {
            return Err(AppError::with_message(
                ErrorCode::BookingNotRunning,
                "Resume the booking before completing it",
            ));
        }
        BookingStatus::Upcoming => {
            return Err(AppError::with_message(
                ErrorCode::BookingNotRunning,
                "Booking has not started yet",
            ));
        }
        BookingStatus::Completed => {
            return Err(AppError::new(ErrorCode::BookingAlreadyFinished));
        }
    }

    let total = round2(booking.total_amount());
    let cash = data.cash_amount.unwrap_or(0.0);
    let upi = data.upi_amount.unwrap_or(0.0);
    if cash < 0.0 || upi < 0.0 {
        return Err(AppError::new(ErrorCode::InvalidPaymentAmount));
    }

    let (cash_amount, upi_amount, payment_status, credit_shortfall) = match data.payment_method {
        PaymentMethod::Cash => (Some(total), None, PaymentStatus::Paid, None),
        PaymentMethod::UpiOnline => (None, Some(total), PaymentStatus::Paid, None),
        PaymentMethod::Split => {
            if data.cash_amount.is_none() || data.upi_amount.is_none() {
                return Err(AppError::with_message(
                    ErrorCode::SplitAmountMismatch,
                    "Split payments need both cash_amount and upi_amount",
                ));
            }
            if !amounts_equal(cash + upi, total) {
                return Err(AppError::new(ErrorCode::SplitAmountMismatch)
                    .with_detail("cash_amount", cash)
                    .with_detail("upi_amount", upi)
                    .with_detail("total", total));
            }
            (Some(cash), Some(upi), PaymentStatus::Paid, None)
        }
        PaymentMethod::Credit => {
            let shortfall = round2(total - cash - upi);
            if shortfall <= MONEY_TOLERANCE {
                return Err(AppError::with_message(
                    ErrorCode::InvalidPaymentAmount,
                    "Nothing left to put on credit",
                ));
            }
            if booking.whatsapp_number.is_none() {
                return Err(AppError::validation(
                    "A WhatsApp number is required to open a credit account",
                ));
            }
            (
                data.cash_amount,
                data.upi_amount,
                PaymentStatus::Credit,
                Some(shortfall),
            )
        }
    };

    if booking_repo::mark_completed(
        pool,
        id,
        data.payment_method,
        cash_amount,
        upi_amount,
        payment_status,
        None,
        now,
    )
    .await?
        == 0
    {
        return Err(AppError::with_message(
            ErrorCode::BookingAlreadyFinished,
            "Booking state changed underneath this request",
        ));
    }

    if let Some(shortfall) = credit_shortfall {
        // whatsapp_number presence was checked above
        let whatsapp = booking.whatsapp_number.clone().unwrap_or_default();
        let (account, _entry) = credit_repo::issue_credit(
            pool,
            &booking.customer_name,
            &whatsapp,
            booking.id,
            shortfall,
            round2(cash + upi),
            now,
        )
        .await?;
        booking_repo::set_credit_account(pool, id, account.id, now).await?;
        tracing::info!(
            "Booking {}: ₹{:.2} put on credit account {}",
            booking.booking_code,
            shortfall,
            account.id
        );
    }

    // Accrual runs after the terminal write; the completed sale stands
    // even when it fails.
    if let Some(phone) = &booking.whatsapp_number
        && let Err(e) = loyalty::accrue_visit(pool, &booking.customer_name, phone, total, now).await
    {
        tracing::error!(
            "Loyalty accrual failed for booking {}: {}",
            booking.booking_code,
            e
        );
    }

    tracing::info!(
        "Booking {} completed: ₹{:.2} via {:?}",
        booking.booking_code,
        total,
        data.payment_method
    );
    load(pool, id).await
}

/// Staff cancel. The group row goes too once its last member is gone.
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let booking = load(pool, id).await?;
    if !booking_repo::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::BookingNotFound).with_detail("id", id));
    }
    if let Some(group_id) = booking.group_id {
        group_repo::delete_if_empty(pool, group_id).await?;
    }
    tracing::info!("Booking {} deleted", booking.booking_code);
    Ok(())
}
