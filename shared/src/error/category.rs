//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Booking errors
/// - 2xxx: Pricing errors
/// - 3xxx: Promotion errors
/// - 4xxx: Loyalty errors
/// - 5xxx: Payment / credit errors
/// - 6xxx: Catalog errors
/// - 7xxx: Archive errors
/// - 8xxx: Settings errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Booking errors (1xxx)
    Booking,
    /// Pricing errors (2xxx)
    Pricing,
    /// Promotion errors (3xxx)
    Promotion,
    /// Loyalty errors (4xxx)
    Loyalty,
    /// Payment / credit errors (5xxx)
    Payment,
    /// Catalog errors (6xxx)
    Catalog,
    /// Archive errors (7xxx)
    Archive,
    /// Settings errors (8xxx)
    Settings,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Booking,
            2000..3000 => Self::Pricing,
            3000..4000 => Self::Promotion,
            4000..5000 => Self::Loyalty,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Archive,
            8000..9000 => Self::Settings,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Booking => "booking",
            Self::Pricing => "pricing",
            Self::Promotion => "promotion",
            Self::Loyalty => "loyalty",
            Self::Payment => "payment",
            Self::Catalog => "catalog",
            Self::Archive => "archive",
            Self::Settings => "settings",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(1999), ErrorCategory::Booking);

        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Promotion);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Loyalty);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Archive);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Settings);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::SeatOccupied.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::PricingNotFound.category(), ErrorCategory::Pricing);
        assert_eq!(
            ErrorCode::PromotionExpired.category(),
            ErrorCategory::Promotion
        );
        assert_eq!(
            ErrorCode::InsufficientPoints.category(),
            ErrorCategory::Loyalty
        );
        assert_eq!(
            ErrorCode::CreditOverpayment.category(),
            ErrorCategory::Payment
        );
        assert_eq!(
            ErrorCode::FoodItemNotFound.category(),
            ErrorCategory::Catalog
        );
        assert_eq!(ErrorCode::ArchiveFailed.category(), ErrorCategory::Archive);
        assert_eq!(
            ErrorCode::InvalidTimezone.category(),
            ErrorCategory::Settings
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ErrorCategory::Booking.name(), "booking");
        assert_eq!(ErrorCategory::System.name(), "system");
    }
}
