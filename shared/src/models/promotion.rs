//! Promotion Model
//!
//! A promotion modifies the resolved price for one exact
//! (category, duration, person count) combination: either a percentage
//! discount or bonus hours, never both for the same combination. Validity
//! is a date range plus an enabled flag, evaluated at read time.

use serde::{Deserialize, Serialize};

use crate::models::booking::Category;

/// The two promotion kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PromotionKind {
    Discount,
    BonusHours,
}

/// Promotion entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Promotion {
    pub id: i64,
    pub kind: PromotionKind,
    pub category: Category,
    pub duration: String,
    pub person_count: i64,
    /// Percentage (0..=100) for discounts, hours for bonus promotions
    pub value: f64,
    /// Validity window (Unix millis, inclusive)
    pub start_date: i64,
    pub end_date: i64,
    pub enabled: bool,
    /// Times this promotion has been applied to a booking
    pub usage_count: i64,
    /// Cumulative customer savings (discount promotions)
    pub total_savings: f64,
    /// Cumulative free hours granted (bonus promotions)
    pub total_hours_given: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCreate {
    pub kind: PromotionKind,
    pub category: Category,
    pub duration: String,
    #[serde(default)]
    pub person_count: Option<i64>,
    pub value: f64,
    pub start_date: i64,
    pub end_date: i64,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Update promotion payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromotionUpdate {
    pub value: Option<f64>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub enabled: Option<bool>,
}

/// Read-time status label, derived from dates and the enabled flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    Disabled,
    Expired,
    Scheduled,
    Active,
}

/// Promotion plus its derived status, as listed in the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionWithStatus {
    #[serde(flatten)]
    pub promotion: Promotion,
    pub status: PromotionStatus,
}

/// What was applied to a booking, embedded in the booking row as JSON
///
/// Tagged so the two kinds stay mutually exclusive in the type system
/// instead of as loose flag pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionDetails {
    Discount {
        promotion_id: i64,
        /// Percentage that was applied
        percent: f64,
        /// Money knocked off the base price
        amount_saved: f64,
    },
    BonusHours {
        promotion_id: i64,
        /// Free hours added to the session
        hours: f64,
    },
}

impl PromotionDetails {
    pub fn promotion_id(&self) -> i64 {
        match self {
            Self::Discount { promotion_id, .. } => *promotion_id,
            Self::BonusHours { promotion_id, .. } => *promotion_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&PromotionKind::BonusHours).unwrap(),
            "\"bonus_hours\""
        );
        assert_eq!(
            serde_json::to_string(&PromotionKind::Discount).unwrap(),
            "\"discount\""
        );
    }

    #[test]
    fn details_are_tagged() {
        let d = PromotionDetails::Discount {
            promotion_id: 7,
            percent: 20.0,
            amount_saved: 100.0,
        };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"type\":\"discount\""));

        let b: PromotionDetails =
            serde_json::from_str(r#"{"type":"bonus_hours","promotion_id":3,"hours":1.5}"#).unwrap();
        assert_eq!(
            b,
            PromotionDetails::BonusHours {
                promotion_id: 3,
                hours: 1.5
            }
        );
    }

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&PromotionStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
    }
}
