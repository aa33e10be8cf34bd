//! Booking lifecycle against an in-memory database
//!
//! Uses ServerState::in_memory, which runs migrations and the first-run
//! seed (5 PC seats, 3 PS5 seats, the default rate card, Asia/Kolkata).
//! Every test passes its own clock in, so nothing here depends on wall
//! time.

use arcade_server::booking::{archive, service};
use arcade_server::db::repository::{
    RepoError, booking as booking_repo, credit as credit_repo, expense as expense_repo,
    food_item as food_repo, group as group_repo, history as history_repo, pricing as pricing_repo,
    promotion as promotion_repo, settings as settings_repo,
};
use arcade_server::reports;
use arcade_server::{Config, ServerState};
use shared::error::ErrorCode;
use shared::models::{
    BookingComplete, BookingCreate, BookingExtend, BookingStatus, BookingType, Category,
    CreditEntryStatus, CreditPaymentCreate, ExpenseCreate, FoodOrderLine, GroupCreate,
    PaymentMethod, PaymentStatus, PromotionCreate, PromotionKind, ReportPeriod, Tariff,
    setting_keys,
};

/// 2025-08-12, 17:30 IST. The seed ships no happy-hours windows and no
/// promotions, so every quote below lands on the regular rate card.
const NOW: i64 = 1_755_000_000_000;
const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;

async fn test_state() -> ServerState {
    let config = Config::with_overrides(":memory:", 0);
    ServerState::in_memory(config).await.unwrap()
}

fn walk_in(seat: i64, duration: &str) -> BookingCreate {
    BookingCreate {
        category: Category::Pc,
        seat_number: seat,
        customer_name: "Asha".to_string(),
        whatsapp_number: None,
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

#[tokio::test]
async fn walk_in_starts_running_at_the_seeded_rate() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let booking = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Running);
    assert_eq!(booking.booking_type, BookingType::WalkIn);
    assert_eq!(booking.seat_name, "PC-1");
    assert_eq!(booking.price, 18.0);
    assert_eq!(booking.original_price, 18.0);
    assert_eq!(booking.start_time, NOW);
    assert_eq!(booking.end_time, NOW + HOUR);
    assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
    assert_eq!(booking.person_count, 1);
    assert!(booking.booking_code.starts_with("BK-"));
}

#[tokio::test]
async fn advance_booking_waits_for_its_slot() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let mut data = walk_in(2, "1 hour");
    data.start_time = Some(NOW + 2 * HOUR);
    let booking = service::create(&state.pool, tz, data, NOW).await.unwrap();

    assert_eq!(booking.status, BookingStatus::Upcoming);
    assert_eq!(booking.booking_type, BookingType::Advance);
    assert_eq!(booking.end_time, NOW + 3 * HOUR);

    // It cannot be settled before it starts
    let err = service::complete(&state.pool, booking.id, cash(), NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotRunning);
}

#[tokio::test]
async fn overlapping_seat_is_rejected_but_back_to_back_is_fine() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let first = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();

    // 1. A slot cutting into the running session is refused
    let mut clash = walk_in(1, "1 hour");
    clash.start_time = Some(NOW + 30 * MINUTE);
    let err = service::create(&state.pool, tz, clash, NOW).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SeatOccupied);

    // 2. The same slot on another seat is fine
    service::create(&state.pool, tz, walk_in(2, "1 hour"), NOW)
        .await
        .unwrap();

    // 3. Back to back: the next session starts the instant the first ends
    let mut next = walk_in(1, "30 mins");
    next.start_time = Some(first.end_time);
    let booked = service::create(&state.pool, tz, next, NOW).await.unwrap();
    assert_eq!(booked.start_time, first.end_time);
}

#[tokio::test]
async fn seats_outside_the_device_config_are_rejected() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // The seed gives PC five seats
    let err = service::create(&state.pool, tz, walk_in(6, "1 hour"), NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err = service::create(&state.pool, tz, walk_in(0, "1 hour"), NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn off_grid_duration_labels_are_a_typed_error() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let err = service::create(&state.pool, tz, walk_in(1, "45 mins"), NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidDuration);
}

#[tokio::test]
async fn pause_banks_the_clock_and_resume_restarts_it() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let booking = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();

    // 1. Pause twenty minutes in: forty minutes stay on the clock
    let paused = service::pause(&state.pool, booking.id, NOW + 20 * MINUTE)
        .await
        .unwrap();
    assert_eq!(paused.status, BookingStatus::Paused);
    assert_eq!(paused.paused_remaining_ms, Some(40 * MINUTE));

    // 2. Pausing a paused session is refused
    let err = service::pause(&state.pool, booking.id, NOW + 25 * MINUTE)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotRunning);

    // 3. Resume an hour later: the banked time runs from the resume instant
    let resumed = service::resume(&state.pool, booking.id, NOW + 80 * MINUTE)
        .await
        .unwrap();
    assert_eq!(resumed.status, BookingStatus::Running);
    assert_eq!(resumed.end_time, NOW + 120 * MINUTE);
    assert_eq!(resumed.paused_remaining_ms, None);

    // 4. Resuming a running session is refused
    let err = service::resume(&state.pool, booking.id, NOW + 90 * MINUTE)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotPaused);
}

#[tokio::test]
async fn extend_adds_time_and_accumulates_the_price() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let booking = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();

    let extended = service::extend(
        &state.pool,
        tz,
        booking.id,
        BookingExtend {
            duration: "30 mins".to_string(),
            skip_promotion: false,
        },
        NOW + 10 * MINUTE,
    )
    .await
    .unwrap();

    assert_eq!(extended.end_time, booking.end_time + 30 * MINUTE);
    assert_eq!(extended.price, 28.0);
    assert_eq!(extended.original_price, 28.0);
    assert_eq!(extended.status, BookingStatus::Running);
}

#[tokio::test]
async fn cash_completion_records_the_full_bill() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // Food lines are repriced from the catalog; the client's figures are
    // ignored
    let menu = food_repo::find_all(&state.pool).await.unwrap();
    let water = menu.iter().find(|i| i.name == "Water").unwrap();

    let mut data = walk_in(1, "1 hour");
    data.food_orders = Some(vec![FoodOrderLine {
        food_item_id: water.id,
        name: "Sparkling".to_string(),
        price: 99.0,
        quantity: 2,
    }]);
    let booking = service::create(&state.pool, tz, data, NOW).await.unwrap();
    assert_eq!(booking.food_orders[0].name, "Water");
    assert_eq!(booking.food_orders[0].price, 1.0);
    assert_eq!(booking.total_amount(), 20.0);

    let done = service::complete(&state.pool, booking.id, cash(), NOW + 30 * MINUTE)
        .await
        .unwrap();
    assert_eq!(done.status, BookingStatus::Completed);
    assert_eq!(done.payment_status, PaymentStatus::Paid);
    assert_eq!(done.payment_method, Some(PaymentMethod::Cash));
    assert_eq!(done.cash_amount, Some(20.0));
    assert_eq!(done.upi_amount, None);
    // Early settlement truncates the session to the time actually used
    assert_eq!(done.end_time, NOW + 30 * MINUTE);

    // A settled booking takes no further actions
    let err = service::complete(&state.pool, booking.id, cash(), NOW + 31 * MINUTE)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingAlreadyFinished);
}

#[tokio::test]
async fn split_payment_must_match_the_bill() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let booking = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();
    let split = |cash_amount, upi_amount| BookingComplete {
        payment_method: PaymentMethod::Split,
        cash_amount,
        upi_amount,
    };

    // 1. Halves that miss the total
    let err = service::complete(
        &state.pool,
        booking.id,
        split(Some(10.0), Some(5.0)),
        NOW + 30 * MINUTE,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::SplitAmountMismatch);

    // 2. A missing half
    let err = service::complete(
        &state.pool,
        booking.id,
        split(Some(18.0), None),
        NOW + 30 * MINUTE,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::SplitAmountMismatch);

    // 3. Exact halves settle
    let done = service::complete(
        &state.pool,
        booking.id,
        split(Some(10.0), Some(8.0)),
        NOW + 30 * MINUTE,
    )
    .await
    .unwrap();
    assert_eq!(done.payment_status, PaymentStatus::Paid);
    assert_eq!(done.cash_amount, Some(10.0));
    assert_eq!(done.upi_amount, Some(8.0));
}

#[tokio::test]
async fn paused_bookings_must_resume_before_settling() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let booking = service::create(&state.pool, tz, walk_in(1, "1 hour"), NOW)
        .await
        .unwrap();
    service::pause(&state.pool, booking.id, NOW + 10 * MINUTE)
        .await
        .unwrap();

    let err = service::complete(&state.pool, booking.id, cash(), NOW + 20 * MINUTE)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotRunning);

    service::resume(&state.pool, booking.id, NOW + 20 * MINUTE)
        .await
        .unwrap();
    let done = service::complete(&state.pool, booking.id, cash(), NOW + 30 * MINUTE)
        .await
        .unwrap();
    assert_eq!(done.status, BookingStatus::Completed);
}

#[tokio::test]
async fn credit_completion_opens_an_account_for_the_shortfall() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let mut data = walk_in(1, "2 hours");
    data.whatsapp_number = Some("9876500001".to_string());
    let booking = service::create(&state.pool, tz, data, NOW).await.unwrap();
    assert_eq!(booking.price, 30.0);

    // 1. Ten in cash, the remaining twenty goes on the book
    let done = service::complete(
        &state.pool,
        booking.id,
        BookingComplete {
            payment_method: PaymentMethod::Credit,
            cash_amount: Some(10.0),
            upi_amount: None,
        },
        NOW + HOUR,
    )
    .await
    .unwrap();
    assert_eq!(done.payment_status, PaymentStatus::Credit);
    assert_eq!(done.status, BookingStatus::Completed);

    let account_id = done.credit_account_id.unwrap();
    let account = credit_repo::find_account(&state.pool, account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.whatsapp_number, "9876500001");
    assert_eq!(account.current_balance, 20.0);

    let entries = credit_repo::find_entries(&state.pool, account_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].booking_id, booking.id);
    assert_eq!(entries[0].credit_issued, 20.0);
    assert_eq!(entries[0].non_credit_paid, 10.0);
    assert_eq!(entries[0].remaining_credit, 20.0);

    // 2. The revenue report carries the issued credit
    let report = reports::revenue(&state.pool, tz, ReportPeriod::Daily, NOW + HOUR)
        .await
        .unwrap();
    assert_eq!(report.credit_issued, 20.0);

    // 3. A bill already covered leaves nothing to put on credit
    let mut covered = walk_in(2, "1 hour");
    covered.whatsapp_number = Some("9876500002".to_string());
    let other = service::create(&state.pool, tz, covered, NOW).await.unwrap();
    let err = service::complete(
        &state.pool,
        other.id,
        BookingComplete {
            payment_method: PaymentMethod::Credit,
            cash_amount: Some(18.0),
            upi_amount: None,
        },
        NOW + 30 * MINUTE,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPaymentAmount);

    // 4. No WhatsApp number, no account to charge
    let anon = service::create(&state.pool, tz, walk_in(3, "1 hour"), NOW)
        .await
        .unwrap();
    let err = service::complete(
        &state.pool,
        anon.id,
        BookingComplete {
            payment_method: PaymentMethod::Credit,
            cash_amount: None,
            upi_amount: None,
        },
        NOW + 30 * MINUTE,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn repayments_settle_the_oldest_entries_first() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // Two credit sales on one account: 20, then 12
    let on_credit = |cash: f64| BookingComplete {
        payment_method: PaymentMethod::Credit,
        cash_amount: Some(cash),
        upi_amount: None,
    };
    let mut data = walk_in(1, "2 hours");
    data.whatsapp_number = Some("9876500010".to_string());
    let first = service::create(&state.pool, tz, data, NOW).await.unwrap();
    service::complete(&state.pool, first.id, on_credit(10.0), NOW + 30 * MINUTE)
        .await
        .unwrap();

    let mut data = walk_in(2, "1 hour");
    data.whatsapp_number = Some("9876500010".to_string());
    let second = service::create(&state.pool, tz, data, NOW).await.unwrap();
    let done = service::complete(&state.pool, second.id, on_credit(6.0), NOW + 45 * MINUTE)
        .await
        .unwrap();
    let account_id = done.credit_account_id.unwrap();

    let payment = |amount: f64| CreditPaymentCreate {
        amount,
        payment_method: "cash".to_string(),
        notes: None,
    };

    // 1. 25 clears the first entry and eats into the second
    let account =
        credit_repo::record_payment(&state.pool, account_id, payment(25.0), NOW + 2 * HOUR)
            .await
            .unwrap();
    assert_eq!(account.current_balance, 7.0);
    let entries = credit_repo::find_entries(&state.pool, account_id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].booking_id, second.id);
    assert_eq!(entries[0].status, CreditEntryStatus::Pending);
    assert_eq!(entries[0].remaining_credit, 7.0);
    assert_eq!(entries[1].booking_id, first.id);
    assert_eq!(entries[1].status, CreditEntryStatus::Paid);
    assert_eq!(entries[1].remaining_credit, 0.0);

    // 2. More than the balance is refused and nothing moves
    let err = credit_repo::record_payment(&state.pool, account_id, payment(7.5), NOW + 2 * HOUR)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    let account = credit_repo::find_account(&state.pool, account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.current_balance, 7.0);

    // 3. Paying the remainder closes the book
    let account =
        credit_repo::record_payment(&state.pool, account_id, payment(7.0), NOW + 3 * HOUR)
            .await
            .unwrap();
    assert_eq!(account.current_balance, 0.0);
    let entries = credit_repo::find_entries(&state.pool, account_id).await.unwrap();
    assert!(entries.iter().all(|e| e.status == CreditEntryStatus::Paid));
}

#[tokio::test]
async fn group_bookings_share_a_code_and_fail_as_one() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let (group, members) = service::create_group(
        &state.pool,
        tz,
        GroupCreate {
            group_name: "Birthday".to_string(),
            bookings: vec![walk_in(1, "1 hour"), walk_in(2, "1 hour")],
        },
        NOW,
    )
    .await
    .unwrap();

    assert_eq!(members.len(), 2);
    assert!(group.group_code.starts_with("GRP-"));
    assert!(members.iter().all(|b| b.group_id == Some(group.id)));
    assert!(
        members
            .iter()
            .all(|b| b.group_code.as_deref() == Some(group.group_code.as_str()))
    );

    // 1. An internal seat clash rejects the whole group before any write
    let err = service::create_group(
        &state.pool,
        tz,
        GroupCreate {
            group_name: "Clash".to_string(),
            bookings: vec![walk_in(3, "1 hour"), walk_in(3, "1 hour")],
        },
        NOW,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::SeatOccupied);
    let all = booking_repo::find_all(&state.pool).await.unwrap();
    assert!(all.iter().all(|b| b.seat_number != 3));
    assert_eq!(group_repo::find_all(&state.pool).await.unwrap().len(), 1);

    // 2. Deleting the last member sweeps the group row
    for member in &members {
        service::delete(&state.pool, member.id).await.unwrap();
    }
    assert!(
        group_repo::find_by_id(&state.pool, group.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn group_members_must_share_one_category() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let mut console = walk_in(1, "1 hour");
    console.category = Category::Ps5;
    let err = service::create_group(
        &state.pool,
        tz,
        GroupCreate {
            group_name: "Mixed".to_string(),
            bookings: vec![walk_in(1, "1 hour"), console],
        },
        NOW,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn refresh_moves_finished_bookings_into_history() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // 1. One settled booking, one still on the clock
    let done = service::create(&state.pool, tz, walk_in(1, "30 mins"), NOW)
        .await
        .unwrap();
    service::complete(&state.pool, done.id, cash(), NOW + 10 * MINUTE)
        .await
        .unwrap();
    let live = service::create(&state.pool, tz, walk_in(2, "2 hours"), NOW)
        .await
        .unwrap();
    expense_repo::insert(
        &state.pool,
        ExpenseCreate {
            category: "Supplies".to_string(),
            description: "Ice".to_string(),
            amount: 5.0,
            spent_at: Some(NOW),
        },
    )
    .await
    .unwrap();

    // 2. Archive pass
    let report = archive::refresh(&state, NOW + 20 * MINUTE).await.unwrap();
    assert_eq!(report.archived, vec![done.id]);
    assert!(report.failed.is_empty());

    // 3. Gone from the active table, intact in history
    assert!(
        booking_repo::find_by_id(&state.pool, done.id)
            .await
            .unwrap()
            .is_none()
    );
    let rows = history_repo::find_between(&state.pool, 0, i64::MAX).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].booking_id, done.id);
    assert_eq!(rows[0].booking_code, done.booking_code);
    assert_eq!(rows[0].price, 10.0);
    assert_eq!(rows[0].status, BookingStatus::Completed);
    assert_eq!(rows[0].archived_at, NOW + 20 * MINUTE);

    // 4. The live booking stays put
    assert!(
        booking_repo::find_by_id(&state.pool, live.id)
            .await
            .unwrap()
            .is_some()
    );

    // 5. The daily report sees the archived sale exactly once
    let revenue = reports::revenue(&state.pool, tz, ReportPeriod::Daily, NOW + 20 * MINUTE)
        .await
        .unwrap();
    assert_eq!(revenue.booking_count, 1);
    assert_eq!(revenue.booking_revenue, 10.0);
    assert_eq!(revenue.cash_total, 10.0);
    assert_eq!(revenue.avg_session_minutes, 10.0);
    assert_eq!(revenue.expense_total, 5.0);
    assert_eq!(revenue.net, 5.0);
    assert!(
        revenue
            .by_status
            .iter()
            .any(|s| s.status == BookingStatus::Running && s.count == 1)
    );
}

#[tokio::test]
async fn archive_preserves_the_bill_and_refuses_live_rows() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // A discounted session with food on the bill
    promotion_repo::insert(
        &state.pool,
        PromotionCreate {
            kind: PromotionKind::Discount,
            category: Category::Pc,
            duration: "30 mins".to_string(),
            person_count: None,
            value: 20.0,
            start_date: NOW - HOUR,
            end_date: NOW + HOUR,
            enabled: None,
        },
    )
    .await
    .unwrap();
    let menu = food_repo::find_all(&state.pool).await.unwrap();
    let water = menu.iter().find(|i| i.name == "Water").unwrap();
    let mut data = walk_in(1, "30 mins");
    data.food_orders = Some(vec![FoodOrderLine {
        food_item_id: water.id,
        name: "Water".to_string(),
        price: 1.0,
        quantity: 2,
    }]);
    let booking = service::create(&state.pool, tz, data, NOW).await.unwrap();
    assert_eq!(booking.price, 8.0);
    let done = service::complete(&state.pool, booking.id, cash(), NOW + 10 * MINUTE)
        .await
        .unwrap();

    // 1. A live booking cannot be moved, and stays where it is
    let live = service::create(&state.pool, tz, walk_in(2, "1 hour"), NOW)
        .await
        .unwrap();
    let err = history_repo::archive_booking(&state.pool, live.id, NOW + 20 * MINUTE)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert!(
        booking_repo::find_by_id(&state.pool, live.id)
            .await
            .unwrap()
            .is_some()
    );

    // 2. The snapshot carries the food lines and the applied promotion
    let history_id = history_repo::archive_booking(&state.pool, done.id, NOW + 20 * MINUTE)
        .await
        .unwrap();
    let row = history_repo::find_by_id(&state.pool, history_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.booking_id, done.id);
    assert_eq!(row.food_orders, done.food_orders);
    assert_eq!(row.promotion, done.promotion);
    assert!(row.promotion.is_some());
    assert_eq!(row.cash_amount, Some(10.0));
}

#[tokio::test]
async fn expired_bookings_archive_only_when_enabled() {
    let state = test_state().await;
    let tz = state.timezone().await;

    // 1. Switch expired archival off
    settings_repo::put(&state.pool, setting_keys::ARCHIVE_EXPIRED, "false")
        .await
        .unwrap();

    // 2. A session nobody settled times out
    let booking = service::create(&state.pool, tz, walk_in(1, "30 mins"), NOW)
        .await
        .unwrap();
    let report = archive::refresh(&state, NOW + 31 * MINUTE).await.unwrap();
    assert_eq!(report.transitioned, 1);
    assert!(report.archived.is_empty());
    let row = booking_repo::find_by_id(&state.pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, BookingStatus::Expired);

    // 3. Switched back on, the next pass picks it up
    settings_repo::put(&state.pool, setting_keys::ARCHIVE_EXPIRED, "true")
        .await
        .unwrap();
    let report = archive::refresh(&state, NOW + 32 * MINUTE).await.unwrap();
    assert_eq!(report.archived, vec![booking.id]);
}

#[tokio::test]
async fn sweeps_flip_each_status_exactly_once() {
    let state = test_state().await;
    let tz = state.timezone().await;

    let mut data = walk_in(1, "30 mins");
    data.start_time = Some(NOW + HOUR);
    service::create(&state.pool, tz, data, NOW).await.unwrap();

    // Start time reached: upcoming -> running
    let flips = booking_repo::sweep_transitions(&state.pool, NOW + HOUR).await.unwrap();
    assert_eq!(flips, (1, 0));

    // Re-running the same sweep moves nothing
    let flips = booking_repo::sweep_transitions(&state.pool, NOW + HOUR).await.unwrap();
    assert_eq!(flips, (0, 0));

    // End time reached: running -> expired
    let flips = booking_repo::sweep_transitions(&state.pool, NOW + HOUR + 30 * MINUTE)
        .await
        .unwrap();
    assert_eq!(flips, (0, 1));
}

#[tokio::test]
async fn initialize_creates_the_database_file_and_seeds_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pos/arcade.db");
    let config = Config::with_overrides(db_path.to_str().unwrap(), 0);

    let state = ServerState::initialize(&config).await.unwrap();
    assert!(db_path.exists());
    assert_eq!(state.timezone().await, chrono_tz::Asia::Kolkata);

    // Three PC rows and three PS5 rows on the regular rate card
    let rates = pricing_repo::find_all(&state.pool, Tariff::Regular).await.unwrap();
    assert_eq!(rates.len(), 6);

    // A second boot over the same file seeds nothing twice
    let again = ServerState::initialize(&config).await.unwrap();
    let rates = pricing_repo::find_all(&again.pool, Tariff::Regular).await.unwrap();
    assert_eq!(rates.len(), 6);
}
