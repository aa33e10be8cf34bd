//! Report Model - revenue aggregates over active and archived bookings

use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingStatus, Category};

/// Reporting window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Current local day
    Daily,
    /// Current week, starting Sunday
    Weekly,
    /// Current calendar month
    Monthly,
}

/// Revenue split for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategoryRevenue {
    pub category: Category,
    pub revenue: f64,
    pub bookings: i64,
}

/// Booking tally for one lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: i64,
}

/// Food sales line for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Aggregated revenue report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    pub period: ReportPeriod,
    /// Report bounds in Unix millis (local day edges)
    pub start_time: i64,
    pub end_time: i64,
    /// Session revenue of completed bookings in the window
    pub booking_revenue: f64,
    /// Food revenue attached to those bookings
    pub food_revenue: f64,
    pub total_revenue: f64,
    pub booking_count: i64,
    /// Mean completed-session length in minutes
    pub avg_session_minutes: f64,
    pub cash_total: f64,
    pub upi_total: f64,
    /// Amount newly put on credit in the window
    pub credit_issued: f64,
    pub expense_total: f64,
    /// total_revenue - expense_total
    pub net: f64,
    pub by_category: Vec<CategoryRevenue>,
    pub by_status: Vec<StatusCount>,
    pub top_food_items: Vec<FoodSales>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_wire_values() {
        assert_eq!(
            serde_json::to_string(&ReportPeriod::Weekly).unwrap(),
            "\"weekly\""
        );
        let p: ReportPeriod = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(p, ReportPeriod::Daily);
    }
}
