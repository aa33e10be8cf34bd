//! Revenue reporting
//!
//! Aggregates live bookings and archived history over a daily / weekly /
//! monthly window. Revenue and payment totals count completed sessions
//! only; the status breakdown covers every row the window touches.

use std::collections::HashMap;

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{
    booking as booking_repo, expense as expense_repo, history as history_repo,
};
use crate::utils::money::round2;
use crate::utils::time::period_bounds;
use shared::error::AppResult;
use shared::models::{
    Booking, BookingHistory, BookingStatus, Category, CategoryRevenue, FoodOrderLine, FoodSales,
    PaymentStatus, ReportPeriod, RevenueReport, StatusCount,
};

const TOP_FOOD_ITEMS: usize = 5;

/// The fields aggregation needs, lifted out of live and archived rows.
struct ReportRow {
    category: Category,
    status: BookingStatus,
    start_time: i64,
    end_time: i64,
    price: f64,
    payment_status: PaymentStatus,
    cash_amount: f64,
    upi_amount: f64,
    food_orders: Vec<FoodOrderLine>,
}

impl ReportRow {
    fn food_total(&self) -> f64 {
        self.food_orders
            .iter()
            .map(|l| l.price * l.quantity as f64)
            .sum()
    }

    fn total(&self) -> f64 {
        self.price + self.food_total()
    }
}

impl From<Booking> for ReportRow {
    fn from(b: Booking) -> Self {
        Self {
            category: b.category,
            status: b.status,
            start_time: b.start_time,
            end_time: b.end_time,
            price: b.price,
            payment_status: b.payment_status,
            cash_amount: b.cash_amount.unwrap_or(0.0),
            upi_amount: b.upi_amount.unwrap_or(0.0),
            food_orders: b.food_orders,
        }
    }
}

impl From<BookingHistory> for ReportRow {
    fn from(b: BookingHistory) -> Self {
        Self {
            category: b.category,
            status: b.status,
            start_time: b.start_time,
            end_time: b.end_time,
            price: b.price,
            payment_status: b.payment_status,
            cash_amount: b.cash_amount.unwrap_or(0.0),
            upi_amount: b.upi_amount.unwrap_or(0.0),
            food_orders: b.food_orders,
        }
    }
}

/// Build the revenue report for `period`, anchored at `now` in `tz`.
pub async fn revenue(
    pool: &SqlitePool,
    tz: Tz,
    period: ReportPeriod,
    now: i64,
) -> AppResult<RevenueReport> {
    let (start_time, end_time) = period_bounds(period, now, tz);

    // Archived rows keep their original start_time, so both tables slice
    // on the same column and a booking appears exactly once.
    let mut rows: Vec<ReportRow> = booking_repo::find_between(pool, start_time, end_time)
        .await?
        .into_iter()
        .map(ReportRow::from)
        .collect();
    rows.extend(
        history_repo::find_between(pool, start_time, end_time)
            .await?
            .into_iter()
            .map(ReportRow::from),
    );

    let mut booking_revenue = 0.0;
    let mut food_revenue = 0.0;
    let mut cash_total = 0.0;
    let mut upi_total = 0.0;
    let mut credit_issued = 0.0;
    let mut booking_count = 0_i64;
    let mut session_minutes = 0.0;
    let mut by_category: HashMap<Category, (f64, i64)> = HashMap::new();
    let mut by_status: HashMap<BookingStatus, i64> = HashMap::new();
    let mut food: HashMap<String, (i64, f64)> = HashMap::new();

    for row in &rows {
        *by_status.entry(row.status).or_insert(0) += 1;

        if row.status != BookingStatus::Completed {
            continue;
        }
        booking_count += 1;
        booking_revenue += row.price;
        food_revenue += row.food_total();
        cash_total += row.cash_amount;
        upi_total += row.upi_amount;
        if row.payment_status == PaymentStatus::Credit {
            credit_issued += row.total() - row.cash_amount - row.upi_amount;
        }
        session_minutes += (row.end_time - row.start_time) as f64 / 60_000.0;

        let entry = by_category.entry(row.category).or_insert((0.0, 0));
        entry.0 += row.total();
        entry.1 += 1;

        for line in &row.food_orders {
            let item = food.entry(line.name.clone()).or_insert((0, 0.0));
            item.0 += line.quantity;
            item.1 += line.price * line.quantity as f64;
        }
    }

    let expense_total: f64 = expense_repo::find_between(pool, start_time, end_time)
        .await?
        .iter()
        .map(|e| e.amount)
        .sum();

    let total_revenue = round2(booking_revenue + food_revenue);
    let avg_session_minutes = if booking_count > 0 {
        round2(session_minutes / booking_count as f64)
    } else {
        0.0
    };

    let mut by_category: Vec<CategoryRevenue> = by_category
        .into_iter()
        .map(|(category, (revenue, bookings))| CategoryRevenue {
            category,
            revenue: round2(revenue),
            bookings,
        })
        .collect();
    by_category.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    let mut by_status: Vec<StatusCount> = by_status
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    by_status.sort_by(|a, b| b.count.cmp(&a.count));

    let mut top_food_items: Vec<FoodSales> = food
        .into_iter()
        .map(|(name, (quantity, revenue))| FoodSales {
            name,
            quantity,
            revenue: round2(revenue),
        })
        .collect();
    top_food_items.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then(a.name.cmp(&b.name)));
    top_food_items.truncate(TOP_FOOD_ITEMS);

    Ok(RevenueReport {
        period,
        start_time,
        end_time,
        booking_revenue: round2(booking_revenue),
        food_revenue: round2(food_revenue),
        total_revenue,
        booking_count,
        avg_session_minutes,
        cash_total: round2(cash_total),
        upi_total: round2(upi_total),
        credit_issued: round2(credit_issued),
        expense_total: round2(expense_total),
        net: round2(total_revenue - expense_total),
        by_category,
        by_status,
        top_food_items,
    })
}
