//! Loyalty accrual and redemption
//!
//! Completion credits the member keyed by the booking's WhatsApp number,
//! creating the member on first visit. Redemption spends points against
//! the reward catalog.

use arcade_server::booking::service;
use arcade_server::db::repository::{
    loyalty as loyalty_repo, settings as settings_repo,
};
use arcade_server::loyalty;
use arcade_server::{Config, ServerState};
use shared::error::ErrorCode;
use shared::models::{
    BookingComplete, BookingCreate, Category, LoyaltyConfig, LoyaltyRewardCreate, LoyaltyTier,
    PaymentMethod, setting_keys,
};

const NOW: i64 = 1_755_000_000_000;
const MINUTE: i64 = 60_000;

async fn test_state() -> ServerState {
    let config = Config::with_overrides(":memory:", 0);
    ServerState::in_memory(config).await.unwrap()
}

fn booking_for(phone: Option<&str>, seat: i64, duration: &str) -> BookingCreate {
    BookingCreate {
        category: Category::Pc,
        seat_number: seat,
        customer_name: "Ravi".to_string(),
        whatsapp_number: phone.map(str::to_string),
        duration: duration.to_string(),
        start_time: None,
        person_count: None,
        skip_promotion: false,
        food_orders: None,
    }
}

fn cash() -> BookingComplete {
    BookingComplete {
        payment_method: PaymentMethod::Cash,
        cash_amount: None,
        upi_amount: None,
    }
}

async fn complete_visit(state: &ServerState, data: BookingCreate) {
    let tz = state.timezone().await;
    let booking = service::create(&state.pool, tz, data, NOW).await.unwrap();
    service::complete(&state.pool, booking.id, cash(), NOW + 15 * MINUTE)
        .await
        .unwrap();
}

#[tokio::test]
async fn completion_creates_the_member_and_awards_points() {
    let state = test_state().await;

    // 1. First visit: an hour of PC at the seeded 18.0, so 10 per visit
    //    plus 5 for the 0-100 spend bracket
    complete_visit(&state, booking_for(Some("9876500001"), 1, "1 hour")).await;

    let member = loyalty_repo::find_member_by_phone(&state.pool, "9876500001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.name, "Ravi");
    assert_eq!(member.points, 15);
    assert_eq!(member.lifetime_points, 15);
    assert_eq!(member.visit_count, 1);
    assert_eq!(member.total_spent, 18.0);
    assert_eq!(member.tier, LoyaltyTier::Bronze);

    // 2. A second visit accrues onto the same member
    complete_visit(&state, booking_for(Some("9876500001"), 2, "2 hours")).await;

    let member = loyalty_repo::find_member_by_phone(&state.pool, "9876500001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.points, 30);
    assert_eq!(member.visit_count, 2);
    assert_eq!(member.total_spent, 48.0);

    // 3. No WhatsApp number, no member
    complete_visit(&state, booking_for(None, 3, "1 hour")).await;
    let members = loyalty_repo::find_all_members(&state.pool).await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn accrual_follows_the_stored_config() {
    let state = test_state().await;

    // Crank the per-visit award so one visit crosses the silver threshold
    let config = LoyaltyConfig {
        points_per_visit: 100,
        ..LoyaltyConfig::default()
    };
    settings_repo::put(
        &state.pool,
        setting_keys::LOYALTY_CONFIG,
        &serde_json::to_string(&config).unwrap(),
    )
    .await
    .unwrap();

    complete_visit(&state, booking_for(Some("9876500002"), 1, "1 hour")).await;

    let member = loyalty_repo::find_member_by_phone(&state.pool, "9876500002")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.points, 105);
    assert_eq!(member.tier, LoyaltyTier::Silver);
}

#[tokio::test]
async fn redemption_spends_points_and_honours_the_guards() {
    let state = test_state().await;

    // Earn 15 points the honest way
    complete_visit(&state, booking_for(Some("9876500003"), 1, "1 hour")).await;
    let member = loyalty_repo::find_member_by_phone(&state.pool, "9876500003")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.points, 15);

    let reward = |name: &str, point_cost, enabled, stock| LoyaltyRewardCreate {
        name: name.to_string(),
        description: None,
        point_cost,
        value: 0.0,
        enabled,
        stock,
    };

    // 1. A reward the balance cannot cover
    let pricey = loyalty_repo::insert_reward(&state.pool, reward("Free Hour", 100, None, None))
        .await
        .unwrap();
    let err = loyalty::redeem(&state.pool, member.id, pricey.id, NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientPoints);

    // 2. A disabled reward
    let disabled =
        loyalty_repo::insert_reward(&state.pool, reward("Poster", 5, Some(false), None))
            .await
            .unwrap();
    let err = loyalty::redeem(&state.pool, member.id, disabled.id, NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RewardDisabled);

    // 3. A reward with no stock left
    let sold_out = loyalty_repo::insert_reward(&state.pool, reward("Sticker", 5, None, Some(0)))
        .await
        .unwrap();
    let err = loyalty::redeem(&state.pool, member.id, sold_out.id, NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RewardOutOfStock);

    // 4. Unknown ids
    let err = loyalty::redeem(&state.pool, 999, pricey.id, NOW).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MemberNotFound);
    let err = loyalty::redeem(&state.pool, member.id, 999, NOW).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RewardNotFound);

    // 5. The happy path debits points and one unit of stock
    let soda = loyalty_repo::insert_reward(&state.pool, reward("Free Soda", 10, None, Some(3)))
        .await
        .unwrap();
    let redemption = loyalty::redeem(&state.pool, member.id, soda.id, NOW)
        .await
        .unwrap();
    assert_eq!(redemption.points_spent, 10);
    assert_eq!(redemption.reward_name, "Free Soda");

    let member = loyalty_repo::find_member(&state.pool, member.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.points, 5);
    // Lifetime points never go down
    assert_eq!(member.lifetime_points, 15);

    let soda = loyalty_repo::find_reward(&state.pool, soda.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(soda.stock, Some(2));

    let redemptions = loyalty_repo::find_redemptions(&state.pool, Some(member.id))
        .await
        .unwrap();
    assert_eq!(redemptions.len(), 1);

    // 6. Five points left will not buy a ten-point soda
    let err = loyalty::redeem(&state.pool, member.id, soda.id, NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientPoints);
}
