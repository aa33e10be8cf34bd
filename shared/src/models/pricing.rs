//! Pricing Model
//!
//! Two price tables share one row shape: the regular table and the
//! happy-hours table. A happy-hours window (per category, HH:MM bounds)
//! decides which table a lookup hits. Price rows are keyed by
//! (category, duration label, person count); multi-person rows exist
//! only for PS5.

use serde::{Deserialize, Serialize};

use crate::models::booking::Category;
use crate::models::promotion::PromotionDetails;

/// One price table row, used by both the regular and happy-hours tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PricingConfig {
    pub id: i64,
    pub category: Category,
    /// Duration label, e.g. "30 mins", "1 hour", "2 hours 30 mins"
    pub duration: String,
    pub person_count: i64,
    pub price: f64,
    pub created_at: i64,
}

/// Create price row payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfigCreate {
    pub category: Category,
    pub duration: String,
    #[serde(default)]
    pub person_count: Option<i64>,
    pub price: f64,
}

/// Update price row payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricingConfigUpdate {
    pub duration: Option<String>,
    pub person_count: Option<i64>,
    pub price: Option<f64>,
}

/// Happy-hours window for one category
///
/// Bounds are HH:MM local time, inclusive on both ends. A window with
/// start > end wraps past midnight ("22:00".."02:00").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HappyHoursWindow {
    pub id: i64,
    pub category: Category,
    pub start_time: String,
    pub end_time: String,
    pub enabled: bool,
    pub created_at: i64,
}

/// Create happy-hours window payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HappyHoursWindowCreate {
    pub category: Category,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Update happy-hours window payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HappyHoursWindowUpdate {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub enabled: Option<bool>,
}

/// Which price table a resolution hit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tariff {
    Regular,
    HappyHours,
}

/// Ask what a booking would cost without creating it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub category: Category,
    pub duration: String,
    #[serde(default)]
    pub person_count: Option<i64>,
    /// Price as of this instant instead of now (Unix millis)
    pub at: Option<i64>,
    #[serde(default)]
    pub skip_promotion: bool,
}

/// Quote result: resolved tariff plus any promotion that would apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub category: Category,
    pub duration: String,
    pub person_count: i64,
    /// Price from the table the resolver selected
    pub base_price: f64,
    pub tariff: Tariff,
    /// Price after the promotion below, equal to base_price when none
    pub final_price: f64,
    /// Extra minutes granted by a bonus-hours promotion
    pub bonus_minutes: i64,
    pub promotion: Option<PromotionDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tariff_wire_values() {
        assert_eq!(
            serde_json::to_string(&Tariff::HappyHours).unwrap(),
            "\"happy_hours\""
        );
        assert_eq!(
            serde_json::to_string(&Tariff::Regular).unwrap(),
            "\"regular\""
        );
    }
}
