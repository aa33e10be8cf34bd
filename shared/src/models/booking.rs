//! Booking Model
//!
//! A booking is one paid session on one seat. Walk-ins start immediately,
//! advance bookings start in the future. Status travels strictly
//! upcoming -> running -> (expired | completed), with running <-> paused
//! in between. Terminal rows are moved to `booking_history` by the archiver.

use serde::{Deserialize, Serialize};

use crate::models::promotion::PromotionDetails;

/// Seat category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Category {
    Pc,
    Ps5,
}

impl Category {
    /// Seat name prefix ("PC-3", "PS5-1")
    pub fn seat_prefix(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Ps5 => "PS5",
        }
    }

    /// Only PS5 seats take more than one player on a single booking.
    pub fn allows_multi_person(&self) -> bool {
        matches!(self, Self::Ps5)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.seat_prefix())
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookingStatus {
    Upcoming,
    Running,
    Paused,
    Expired,
    Completed,
}

impl BookingStatus {
    /// Terminal states are eligible for archival and accept no further edits.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Completed)
    }
}

/// How the session was created: immediately, for a future slot, or while a
/// happy-hours window was active (priced from the happy-hours table).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookingType {
    #[serde(rename = "walk-in")]
    #[cfg_attr(feature = "db", sqlx(rename = "walk-in"))]
    WalkIn,
    Advance,
    #[serde(rename = "happy-hour")]
    #[cfg_attr(feature = "db", sqlx(rename = "happy-hour"))]
    HappyHour,
}

/// How the customer settled the bill
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    Cash,
    UpiOnline,
    Split,
    Credit,
}

/// Settlement state of a booking's bill
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Credit,
}

/// One food line attached to a booking (stored as a JSON column)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodOrderLine {
    pub food_item_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    /// Short human-facing code printed on receipts ("BK-482915")
    pub booking_code: String,
    /// Group membership, when several seats were booked together
    pub group_id: Option<i64>,
    pub group_code: Option<String>,
    pub category: Category,
    pub seat_number: i64,
    /// Denormalized "PC-3" style label, kept in sync with the device config
    pub seat_name: String,
    pub customer_name: String,
    pub whatsapp_number: Option<String>,
    /// Session start (Unix millis)
    pub start_time: i64,
    /// Session end (Unix millis); recomputed on resume and extend
    pub end_time: i64,
    /// Final price after promotion
    pub price: f64,
    /// Resolved tariff price before any promotion
    pub original_price: f64,
    pub status: BookingStatus,
    pub booking_type: BookingType,
    /// Milliseconds left on the clock when paused; None unless paused
    pub paused_remaining_ms: Option<i64>,
    pub person_count: i64,
    pub payment_method: Option<PaymentMethod>,
    pub cash_amount: Option<f64>,
    pub upi_amount: Option<f64>,
    pub payment_status: PaymentStatus,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub food_orders: Vec<FoodOrderLine>,
    /// Promotion applied at create/extend time, if any
    #[cfg_attr(feature = "db", sqlx(json))]
    pub promotion: Option<PromotionDetails>,
    /// Credit account charged when payment_method is credit
    pub credit_account_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    /// Total bill: session price plus food lines.
    pub fn total_amount(&self) -> f64 {
        let food: f64 = self
            .food_orders
            .iter()
            .map(|l| l.price * l.quantity as f64)
            .sum();
        self.price + food
    }
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub category: Category,
    pub seat_number: i64,
    pub customer_name: String,
    pub whatsapp_number: Option<String>,
    /// Duration label, e.g. "1 hour" or "1 hour 30 mins"
    pub duration: String,
    /// Omitted for walk-ins (session starts now)
    pub start_time: Option<i64>,
    #[serde(default)]
    pub person_count: Option<i64>,
    /// Opt out of automatic promotion application
    #[serde(default)]
    pub skip_promotion: bool,
    #[serde(default)]
    pub food_orders: Option<Vec<FoodOrderLine>>,
}

/// Update booking payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingUpdate {
    pub customer_name: Option<String>,
    pub whatsapp_number: Option<String>,
    pub seat_number: Option<i64>,
    pub food_orders: Option<Vec<FoodOrderLine>>,
}

/// Extend a running/paused booking by another duration label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingExtend {
    /// Duration label to add, priced at the tariff in effect right now
    pub duration: String,
    #[serde(default)]
    pub skip_promotion: bool,
}

/// Complete a booking and capture payment
///
/// Loyalty accrual is automatic: a booking with a WhatsApp number credits
/// the member keyed by that number, creating the member on first visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingComplete {
    pub payment_method: PaymentMethod,
    /// Required for split payments; both halves must sum to the bill
    pub cash_amount: Option<f64>,
    pub upi_amount: Option<f64>,
}

/// Create a session group: several seats booked together under one code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreate {
    pub group_name: String,
    pub bookings: Vec<BookingCreate>,
}

/// Session group entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SessionGroup {
    pub id: i64,
    pub group_code: String,
    pub group_name: String,
    pub category: Category,
    pub booking_type: BookingType,
    pub created_at: i64,
}

/// Archived booking: the full booking row plus the archival timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingHistory {
    pub id: i64,
    /// Id the row had while in the active table
    pub booking_id: i64,
    pub booking_code: String,
    pub group_id: Option<i64>,
    pub group_code: Option<String>,
    pub category: Category,
    pub seat_number: i64,
    pub seat_name: String,
    pub customer_name: String,
    pub whatsapp_number: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub price: f64,
    pub original_price: f64,
    pub status: BookingStatus,
    pub booking_type: BookingType,
    pub paused_remaining_ms: Option<i64>,
    pub person_count: i64,
    pub payment_method: Option<PaymentMethod>,
    pub cash_amount: Option<f64>,
    pub upi_amount: Option<f64>,
    pub payment_status: PaymentStatus,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub food_orders: Vec<FoodOrderLine>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub promotion: Option<PromotionDetails>,
    pub credit_account_id: Option<i64>,
    pub created_at: i64,
    pub archived_at: i64,
}

/// Outcome of a status sweep + archive pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Bookings whose status flipped this pass
    pub transitioned: u64,
    /// Booking ids moved to history
    pub archived: Vec<i64>,
    /// Bookings that could not be archived; the rest of the batch proceeds
    pub failed: Vec<ArchiveFailure>,
}

/// One booking the archiver could not move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveFailure {
    pub booking_id: i64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wire_values() {
        assert_eq!(serde_json::to_string(&Category::Pc).unwrap(), "\"PC\"");
        assert_eq!(serde_json::to_string(&Category::Ps5).unwrap(), "\"PS5\"");
        let c: Category = serde_json::from_str("\"PS5\"").unwrap();
        assert_eq!(c, Category::Ps5);
    }

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn booking_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&BookingType::WalkIn).unwrap(),
            "\"walk-in\""
        );
        assert_eq!(
            serde_json::to_string(&BookingType::Advance).unwrap(),
            "\"advance\""
        );
    }

    #[test]
    fn payment_method_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::UpiOnline).unwrap(),
            "\"upi_online\""
        );
    }

    #[test]
    fn terminal_states() {
        assert!(BookingStatus::Expired.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(!BookingStatus::Running.is_terminal());
        assert!(!BookingStatus::Paused.is_terminal());
        assert!(!BookingStatus::Upcoming.is_terminal());
    }

    #[test]
    fn multi_person_only_for_ps5() {
        assert!(Category::Ps5.allows_multi_person());
        assert!(!Category::Pc.allows_multi_person());
    }
}
