//! Price resolution
//!
//! One lookup path for everything that needs a price: pick the table
//! (happy-hours when the category's window covers the local time of `now`,
//! regular otherwise), read the exact (category, duration, person_count)
//! row, then let the promotion engine finish the quote. A missing row is a
//! typed error, never a zero price.

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{pricing as pricing_repo, promotion as promotion_repo};
use crate::pricing::window::{bound_minutes, window_contains};
use crate::promotion::engine;
use crate::utils::time::{minutes_of_day, parse_hhmm};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, PriceQuote, QuoteRequest, Tariff};

/// Whether the category's happy-hours window is enabled and covers `now`.
pub async fn happy_hours_active(
    pool: &SqlitePool,
    tz: Tz,
    category: Category,
    now: i64,
) -> AppResult<bool> {
    let Some(window) = pricing_repo::find_window(pool, category).await? else {
        return Ok(false);
    };
    if !window.enabled {
        return Ok(false);
    }
    let (Some(start), Some(end)) = (parse_hhmm(&window.start_time), parse_hhmm(&window.end_time))
    else {
        tracing::warn!(
            "Malformed happy-hours window for {}: {}..{}",
            category,
            window.start_time,
            window.end_time
        );
        return Ok(false);
    };
    Ok(window_contains(
        bound_minutes(start),
        bound_minutes(end),
        minutes_of_day(now, tz),
    ))
}

/// Resolve the base price for an exact key at `now`.
///
/// An active window with no happy-hours row for this key falls through to
/// the regular table; only when neither table has the row does this fail
/// with `PricingNotFound`.
pub async fn resolve_base(
    pool: &SqlitePool,
    tz: Tz,
    category: Category,
    duration: &str,
    person_count: i64,
    now: i64,
) -> AppResult<(f64, Tariff)> {
    if person_count < 1 {
        return Err(AppError::with_message(
            ErrorCode::InvalidPersonCount,
            "person_count must be at least 1",
        ));
    }
    if person_count > 1 && !category.allows_multi_person() {
        return Err(AppError::new(ErrorCode::PersonCountNotAllowed));
    }

    if happy_hours_active(pool, tz, category, now).await?
        && let Some(row) =
            pricing_repo::find_price(pool, Tariff::HappyHours, category, duration, person_count)
                .await?
    {
        return Ok((row.price, Tariff::HappyHours));
    }

    let row = pricing_repo::find_price(pool, Tariff::Regular, category, duration, person_count)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::PricingNotFound,
                format!("No pricing for {category} \"{duration}\" ({person_count} person)"),
            )
            .with_detail("category", category.seat_prefix())
            .with_detail("duration", duration)
            .with_detail("person_count", person_count)
        })?;
    Ok((row.price, Tariff::Regular))
}

/// Full quote: resolved tariff plus whatever promotion would apply.
pub async fn quote(
    pool: &SqlitePool,
    tz: Tz,
    req: &QuoteRequest,
    now: i64,
) -> AppResult<PriceQuote> {
    let at = req.at.unwrap_or(now);
    let person_count = req.person_count.unwrap_or(1);
    let (base_price, tariff) =
        resolve_base(pool, tz, req.category, &req.duration, person_count, at).await?;

    let mut final_price = base_price;
    let mut bonus_minutes = 0;
    let mut promotion = None;
    if !req.skip_promotion {
        let candidates =
            promotion_repo::find_enabled_for_key(pool, req.category, &req.duration, person_count)
                .await?;
        if let Some(promo) = engine::pick_valid(&candidates, at) {
            let applied = engine::apply(promo, base_price);
            final_price = applied.final_price;
            bonus_minutes = applied.bonus_minutes;
            promotion = Some(applied.details);
        }
    }

    Ok(PriceQuote {
        category: req.category,
        duration: req.duration.clone(),
        person_count,
        base_price,
        tariff,
        final_price,
        bonus_minutes,
        promotion,
    })
}
