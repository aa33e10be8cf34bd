//! Quote resolution: rate card, happy-hours windows, promotions
//!
//! Times below are built from local IST wall-clock minutes on a fixed
//! date, since window containment works on the store's local time of day.

use arcade_server::booking::service;
use arcade_server::db::repository::{pricing as pricing_repo, promotion as promotion_repo};
use arcade_server::pricing::resolver;
use arcade_server::utils::time;
use arcade_server::{Config, ServerState};
use chrono_tz::Tz;
use shared::error::ErrorCode;
use shared::models::{
    BookingCreate, BookingExtend, Category, HappyHoursWindowCreate, HappyHoursWindowUpdate,
    PricingConfigCreate, PromotionCreate, PromotionKind, QuoteRequest, Tariff,
};

const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

async fn test_state() -> ServerState {
    let config = Config::with_overrides(":memory:", 0);
    ServerState::in_memory(config).await.unwrap()
}

fn quote_req(category: Category, duration: &str) -> QuoteRequest {
    QuoteRequest {
        category,
        duration: duration.to_string(),
        person_count: None,
        at: None,
        skip_promotion: false,
    }
}

/// Millis for `minutes` past local midnight on 2025-08-12.
fn local(tz: Tz, minutes: i64) -> i64 {
    let date = time::parse_date("2025-08-12").unwrap();
    time::day_start_millis(date, tz) + minutes * MINUTE
}

#[tokio::test]
async fn quotes_come_from_the_regular_table_by_default() {
    let state = test_state().await;
    let tz = state.timezone().await;
    let noon = local(tz, 12 * 60);

    let quote = resolver::quote(&state.pool, tz, &quote_req(Category::Pc, "1 hour"), noon)
        .await
        .unwrap();
    assert_eq!(quote.tariff, Tariff::Regular);
    assert_eq!(quote.base_price, 18.0);
    assert_eq!(quote.final_price, 18.0);
    assert_eq!(quote.bonus_minutes, 0);
    assert!(quote.promotion.is_none());

    // A key with no row is a typed error, never a zero price
    let err = resolver::quote(&state.pool, tz, &quote_req(Category::Pc, "3 hours"), noon)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PricingNotFound);
}

#[tokio::test]
async fn happy_hours_window_switches_the_tariff() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // A 14:00-18:00 window with a cheaper hourly rate
    let window = pricing_repo::insert_window(
        &state.pool,
        HappyHoursWindowCreate {
            category: Category::Pc,
            start_time: "14:00".to_string(),
            end_time: "18:00".to_string(),
            enabled: None,
        },
    )
    .await
    .unwrap();
    pricing_repo::insert_price(
        &state.pool,
        Tariff::HappyHours,
        PricingConfigCreate {
            category: Category::Pc,
            duration: "1 hour".to_string(),
            person_count: None,
            price: 12.0,
        },
    )
    .await
    .unwrap();

    let hourly = |at: i64| {
        let pool = state.pool.clone();
        async move {
            resolver::quote(&pool, tz, &quote_req(Category::Pc, "1 hour"), at)
                .await
                .unwrap()
        }
    };

    // 1. Inside the window the happy table wins
    let quote = hourly(local(tz, 15 * 60)).await;
    assert_eq!(quote.tariff, Tariff::HappyHours);
    assert_eq!(quote.base_price, 12.0);

    // 2. Both bounds are inclusive; one minute past the end is regular again
    assert_eq!(hourly(local(tz, 14 * 60)).await.tariff, Tariff::HappyHours);
    assert_eq!(hourly(local(tz, 18 * 60)).await.tariff, Tariff::HappyHours);
    assert_eq!(hourly(local(tz, 18 * 60 + 1)).await.tariff, Tariff::Regular);

    // 3. A key the happy table misses falls through to the regular table
    let quote = resolver::quote(
        &state.pool,
        tz,
        &quote_req(Category::Pc, "2 hours"),
        local(tz, 15 * 60),
    )
    .await
    .unwrap();
    assert_eq!(quote.tariff, Tariff::Regular);
    assert_eq!(quote.base_price, 30.0);

    // 4. A disabled window never fires
    pricing_repo::update_window(
        &state.pool,
        window.id,
        HappyHoursWindowUpdate {
            start_time: None,
            end_time: None,
            enabled: Some(false),
        },
    )
    .await
    .unwrap();
    assert_eq!(hourly(local(tz, 15 * 60)).await.tariff, Tariff::Regular);
}

#[tokio::test]
async fn person_count_selects_the_exact_row() {
    let state = test_state().await;
    let tz = state.timezone().await;
    let noon = local(tz, 12 * 60);

    // A duo rate for PS5
    pricing_repo::insert_price(
        &state.pool,
        Tariff::Regular,
        PricingConfigCreate {
            category: Category::Ps5,
            duration: "1 hour".to_string(),
            person_count: Some(2),
            price: 40.0,
        },
    )
    .await
    .unwrap();

    let mut req = quote_req(Category::Ps5, "1 hour");
    req.person_count = Some(2);
    let quote = resolver::quote(&state.pool, tz, &req, noon).await.unwrap();
    assert_eq!(quote.base_price, 40.0);
    assert_eq!(quote.person_count, 2);

    // No row for three players
    req.person_count = Some(3);
    let err = resolver::quote(&state.pool, tz, &req, noon).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PricingNotFound);

    // PC seats take one player only
    let mut req = quote_req(Category::Pc, "1 hour");
    req.person_count = Some(2);
    let err = resolver::quote(&state.pool, tz, &req, noon).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PersonCountNotAllowed);

    req.person_count = Some(0);
    let err = resolver::quote(&state.pool, tz, &req, noon).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPersonCount);
}

#[tokio::test]
async fn duo_rate_follows_the_window_like_any_other_key() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // PS5 duo: 200 flat, 150 between 14:00 and 18:00
    pricing_repo::insert_price(
        &state.pool,
        Tariff::Regular,
        PricingConfigCreate {
            category: Category::Ps5,
            duration: "1 hour".to_string(),
            person_count: Some(2),
            price: 200.0,
        },
    )
    .await
    .unwrap();
    pricing_repo::insert_window(
        &state.pool,
        HappyHoursWindowCreate {
            category: Category::Ps5,
            start_time: "14:00".to_string(),
            end_time: "18:00".to_string(),
            enabled: None,
        },
    )
    .await
    .unwrap();
    pricing_repo::insert_price(
        &state.pool,
        Tariff::HappyHours,
        PricingConfigCreate {
            category: Category::Ps5,
            duration: "1 hour".to_string(),
            person_count: Some(2),
            price: 150.0,
        },
    )
    .await
    .unwrap();

    let mut req = quote_req(Category::Ps5, "1 hour");
    req.person_count = Some(2);

    let at_three = resolver::quote(&state.pool, tz, &req, local(tz, 15 * 60))
        .await
        .unwrap();
    assert_eq!(at_three.tariff, Tariff::HappyHours);
    assert_eq!(at_three.base_price, 150.0);

    let at_seven = resolver::quote(&state.pool, tz, &req, local(tz, 19 * 60))
        .await
        .unwrap();
    assert_eq!(at_seven.tariff, Tariff::Regular);
    assert_eq!(at_seven.base_price, 200.0);
}

#[tokio::test]
async fn extensions_price_the_added_time_at_extend_time() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // Discounted half-hour between 14:00 and 18:00; the hourly rate has no
    // happy-hours row at all
    pricing_repo::insert_window(
        &state.pool,
        HappyHoursWindowCreate {
            category: Category::Pc,
            start_time: "14:00".to_string(),
            end_time: "18:00".to_string(),
            enabled: None,
        },
    )
    .await
    .unwrap();
    pricing_repo::insert_price(
        &state.pool,
        Tariff::HappyHours,
        PricingConfigCreate {
            category: Category::Pc,
            duration: "30 mins".to_string(),
            person_count: None,
            price: 6.0,
        },
    )
    .await
    .unwrap();

    let create = |seat: i64, at: i64| {
        let pool = state.pool.clone();
        async move {
            service::create(
                &pool,
                tz,
                BookingCreate {
                    category: Category::Pc,
                    seat_number: seat,
                    customer_name: "Ravi".to_string(),
                    whatsapp_number: None,
                    duration: "1 hour".to_string(),
                    start_time: None,
                    person_count: None,
                    skip_promotion: false,
                    food_orders: None,
                },
                at,
            )
            .await
            .unwrap()
        }
    };
    let half_hour_more = |id: i64, at: i64| {
        let pool = state.pool.clone();
        async move {
            service::extend(
                &pool,
                tz,
                id,
                BookingExtend {
                    duration: "30 mins".to_string(),
                    skip_promotion: false,
                },
                at,
            )
            .await
            .unwrap()
        }
    };

    // 1. Open inside the window: the hourly base still comes from the
    //    regular table, the added half hour from the happy table
    let inside = create(1, local(tz, 14 * 60)).await;
    assert_eq!(inside.price, 18.0);
    let extended = half_hour_more(inside.id, local(tz, 14 * 60 + 30)).await;
    assert_eq!(extended.price, 24.0);
    assert_eq!(extended.end_time, inside.end_time + 30 * MINUTE);

    // 2. The same extension after the window closes costs the regular rate
    let outside = create(2, local(tz, 17 * 60 + 45)).await;
    let extended = half_hour_more(outside.id, local(tz, 18 * 60 + 30)).await;
    assert_eq!(extended.price, 28.0);
}

#[tokio::test]
async fn discount_promotions_cut_the_price_while_valid() {
    let state = test_state().await;
    let tz = state.timezone().await;
    let noon = local(tz, 12 * 60);

    promotion_repo::insert(
        &state.pool,
        PromotionCreate {
            kind: PromotionKind::Discount,
            category: Category::Pc,
            duration: "1 hour".to_string(),
            person_count: None,
            value: 20.0,
            start_date: noon - DAY,
            end_date: noon + DAY,
            enabled: None,
        },
    )
    .await
    .unwrap();

    // 1. Twenty percent off the 18.0 hourly rate
    let quote = resolver::quote(&state.pool, tz, &quote_req(Category::Pc, "1 hour"), noon)
        .await
        .unwrap();
    assert_eq!(quote.base_price, 18.0);
    assert_eq!(quote.final_price, 14.4);
    assert!(quote.promotion.is_some());

    // 2. skip_promotion keeps the base price
    let mut req = quote_req(Category::Pc, "1 hour");
    req.skip_promotion = true;
    let quote = resolver::quote(&state.pool, tz, &req, noon).await.unwrap();
    assert_eq!(quote.final_price, 18.0);
    assert!(quote.promotion.is_none());

    // 3. Other keys are untouched
    let quote = resolver::quote(&state.pool, tz, &quote_req(Category::Pc, "2 hours"), noon)
        .await
        .unwrap();
    assert_eq!(quote.final_price, 30.0);

    // 4. Past its end date the promotion goes dormant
    let quote = resolver::quote(
        &state.pool,
        tz,
        &quote_req(Category::Pc, "1 hour"),
        noon + 2 * DAY,
    )
    .await
    .unwrap();
    assert_eq!(quote.final_price, 18.0);
    assert!(quote.promotion.is_none());
}

#[tokio::test]
async fn bonus_hours_promotions_extend_the_session_instead() {
    let state = test_state().await;
    let tz = state.timezone().await;
    let noon = local(tz, 12 * 60);

    let promotion = promotion_repo::insert(
        &state.pool,
        PromotionCreate {
            kind: PromotionKind::BonusHours,
            category: Category::Pc,
            duration: "1 hour".to_string(),
            person_count: None,
            value: 1.0,
            start_date: noon - DAY,
            end_date: noon + DAY,
            enabled: None,
        },
    )
    .await
    .unwrap();

    // 1. The quote keeps the price and grants the time
    let quote = resolver::quote(&state.pool, tz, &quote_req(Category::Pc, "1 hour"), noon)
        .await
        .unwrap();
    assert_eq!(quote.final_price, 18.0);
    assert_eq!(quote.bonus_minutes, 60);

    // 2. Creating the booking rolls the bonus into the end time and counts
    //    the use
    let booking = service::create(
        &state.pool,
        tz,
        BookingCreate {
            category: Category::Pc,
            seat_number: 1,
            customer_name: "Asha".to_string(),
            whatsapp_number: None,
            duration: "1 hour".to_string(),
            start_time: None,
            person_count: None,
            skip_promotion: false,
            food_orders: None,
        },
        noon,
    )
    .await
    .unwrap();
    assert_eq!(booking.end_time, noon + 2 * HOUR);
    assert_eq!(booking.price, 18.0);
    assert!(booking.promotion.is_some());

    let counted = promotion_repo::find_by_id(&state.pool, promotion.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(counted.usage_count, 1);
    assert_eq!(counted.total_hours_given, 1.0);
}
