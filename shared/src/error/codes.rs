//! Unified error codes for the arcade booking server
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Booking errors
//! - 2xxx: Pricing errors
//! - 3xxx: Promotion errors
//! - 4xxx: Loyalty errors
//! - 5xxx: Payment / credit errors
//! - 6xxx: Catalog errors
//! - 7xxx: Archive errors
//! - 8xxx: Settings errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 1001,
    /// Seat already occupied for the requested window
    SeatOccupied = 1002,
    /// Booking has already reached a terminal state
    BookingAlreadyFinished = 1003,
    /// Operation requires a running booking
    BookingNotRunning = 1004,
    /// Operation requires a paused booking
    BookingNotPaused = 1005,
    /// Unparseable duration label
    InvalidDuration = 1006,
    /// Person count not allowed for this category
    InvalidPersonCount = 1007,
    /// End time not after start time
    EndBeforeStart = 1008,
    /// Session group not found
    GroupNotFound = 1009,

    // ==================== 2xxx: Pricing ====================
    /// No pricing row for (category, duration, person count)
    PricingNotFound = 2001,
    /// Happy hours window not found
    WindowNotFound = 2002,
    /// Pricing row already exists for this combination
    DuplicatePricing = 2003,
    /// Malformed HH:MM window bound
    InvalidTimeWindow = 2004,
    /// Multi-person pricing restricted to PS5
    PersonCountNotAllowed = 2005,

    // ==================== 3xxx: Promotion ====================
    /// Promotion not found
    PromotionNotFound = 3001,
    /// Promotion end date has passed
    PromotionExpired = 3002,
    /// Promotion is disabled
    PromotionDisabled = 3003,
    /// Promotion start date is in the future
    PromotionNotStarted = 3004,
    /// A promotion of the other kind already covers this combination
    PromotionConflict = 3005,
    /// Discount percentage out of range
    InvalidDiscount = 3006,
    /// Bonus hours must be positive
    InvalidBonusHours = 3007,

    // ==================== 4xxx: Loyalty ====================
    /// Loyalty member not found
    MemberNotFound = 4001,
    /// Reward not found
    RewardNotFound = 4002,
    /// Not enough points for this redemption
    InsufficientPoints = 4003,
    /// Reward stock exhausted
    RewardOutOfStock = 4004,
    /// Reward is disabled
    RewardDisabled = 4005,
    /// A member with this phone number already exists
    MemberAlreadyExists = 4006,

    // ==================== 5xxx: Payment / Credit ====================
    /// Payment amount must be positive
    InvalidPaymentAmount = 5001,
    /// Split amounts do not add up to the total
    SplitAmountMismatch = 5002,
    /// Credit account not found
    CreditAccountNotFound = 5003,
    /// Credit entry not found
    CreditEntryNotFound = 5004,
    /// Payment exceeds outstanding credit balance
    CreditOverpayment = 5005,
    /// Credit entry has already been settled
    CreditEntryAlreadyPaid = 5006,
    /// Unsupported payment method
    InvalidPaymentMethod = 5007,

    // ==================== 6xxx: Catalog ====================
    /// Food item not found
    FoodItemNotFound = 6001,
    /// Food item name already in use
    FoodItemNameExists = 6002,
    /// Not enough stock for this order
    InsufficientStock = 6003,
    /// Device category not found
    DeviceNotFound = 6004,
    /// Expense not found
    ExpenseNotFound = 6005,

    // ==================== 7xxx: Archive ====================
    /// Archival failed for this booking
    ArchiveFailed = 7001,
    /// Cannot archive a booking that is still active
    BookingStillActive = 7002,
    /// History record not found
    HistoryNotFound = 7003,

    // ==================== 8xxx: Settings ====================
    /// Setting not found
    SettingNotFound = 8001,
    /// Unrecognized IANA timezone
    InvalidTimezone = 8002,
    /// Malformed HH:MM cutoff value
    InvalidCutoffTime = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            // Booking
            Self::BookingNotFound => "Booking not found",
            Self::SeatOccupied => "Seat is already occupied for the requested time",
            Self::BookingAlreadyFinished => "Booking has already finished",
            Self::BookingNotRunning => "Booking is not running",
            Self::BookingNotPaused => "Booking is not paused",
            Self::InvalidDuration => "Unrecognized duration",
            Self::InvalidPersonCount => "Person count not allowed for this category",
            Self::EndBeforeStart => "End time must be after start time",
            Self::GroupNotFound => "Session group not found",

            // Pricing
            Self::PricingNotFound => "No pricing found for the requested combination",
            Self::WindowNotFound => "Happy hours window not found",
            Self::DuplicatePricing => "Pricing already exists for this combination",
            Self::InvalidTimeWindow => "Time window must be HH:MM",
            Self::PersonCountNotAllowed => "Multi-person pricing is only available for PS5",

            // Promotion
            Self::PromotionNotFound => "Promotion not found",
            Self::PromotionExpired => "Promotion has expired",
            Self::PromotionDisabled => "Promotion is disabled",
            Self::PromotionNotStarted => "Promotion has not started yet",
            Self::PromotionConflict => "Another promotion already covers this combination",
            Self::InvalidDiscount => "Discount percentage must be between 0 and 100",
            Self::InvalidBonusHours => "Bonus hours must be positive",

            // Loyalty
            Self::MemberNotFound => "Loyalty member not found",
            Self::RewardNotFound => "Reward not found",
            Self::InsufficientPoints => "Not enough points for this redemption",
            Self::RewardOutOfStock => "Reward is out of stock",
            Self::RewardDisabled => "Reward is disabled",
            Self::MemberAlreadyExists => "A member with this phone number already exists",

            // Payment / Credit
            Self::InvalidPaymentAmount => "Payment amount must be positive",
            Self::SplitAmountMismatch => "Split amounts do not add up to the total",
            Self::CreditAccountNotFound => "Credit account not found",
            Self::CreditEntryNotFound => "Credit entry not found",
            Self::CreditOverpayment => "Payment exceeds the outstanding balance",
            Self::CreditEntryAlreadyPaid => "Credit entry has already been settled",
            Self::InvalidPaymentMethod => "Unsupported payment method",

            // Catalog
            Self::FoodItemNotFound => "Food item not found",
            Self::FoodItemNameExists => "Food item name already in use",
            Self::InsufficientStock => "Not enough stock",
            Self::DeviceNotFound => "Device category not found",
            Self::ExpenseNotFound => "Expense not found",

            // Archive
            Self::ArchiveFailed => "Failed to archive booking",
            Self::BookingStillActive => "Cannot archive an active booking",
            Self::HistoryNotFound => "History record not found",

            // Settings
            Self::SettingNotFound => "Setting not found",
            Self::InvalidTimezone => "Unrecognized timezone",
            Self::InvalidCutoffTime => "Cutoff time must be HH:MM",

            // System
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::TimeoutError => "Operation timed out",
        }
    }

    /// Get the numeric code value
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when a u16 value does not map to a known error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::InvalidFormat),
            7 => Ok(Self::RequiredField),
            8 => Ok(Self::ValueOutOfRange),

            1001 => Ok(Self::BookingNotFound),
            1002 => Ok(Self::SeatOccupied),
            1003 => Ok(Self::BookingAlreadyFinished),
            1004 => Ok(Self::BookingNotRunning),
            1005 => Ok(Self::BookingNotPaused),
            1006 => Ok(Self::InvalidDuration),
            1007 => Ok(Self::InvalidPersonCount),
            1008 => Ok(Self::EndBeforeStart),
            1009 => Ok(Self::GroupNotFound),

            2001 => Ok(Self::PricingNotFound),
            2002 => Ok(Self::WindowNotFound),
            2003 => Ok(Self::DuplicatePricing),
            2004 => Ok(Self::InvalidTimeWindow),
            2005 => Ok(Self::PersonCountNotAllowed),

            3001 => Ok(Self::PromotionNotFound),
            3002 => Ok(Self::PromotionExpired),
            3003 => Ok(Self::PromotionDisabled),
            3004 => Ok(Self::PromotionNotStarted),
            3005 => Ok(Self::PromotionConflict),
            3006 => Ok(Self::InvalidDiscount),
            3007 => Ok(Self::InvalidBonusHours),

            4001 => Ok(Self::MemberNotFound),
            4002 => Ok(Self::RewardNotFound),
            4003 => Ok(Self::InsufficientPoints),
            4004 => Ok(Self::RewardOutOfStock),
            4005 => Ok(Self::RewardDisabled),
            4006 => Ok(Self::MemberAlreadyExists),

            5001 => Ok(Self::InvalidPaymentAmount),
            5002 => Ok(Self::SplitAmountMismatch),
            5003 => Ok(Self::CreditAccountNotFound),
            5004 => Ok(Self::CreditEntryNotFound),
            5005 => Ok(Self::CreditOverpayment),
            5006 => Ok(Self::CreditEntryAlreadyPaid),
            5007 => Ok(Self::InvalidPaymentMethod),

            6001 => Ok(Self::FoodItemNotFound),
            6002 => Ok(Self::FoodItemNameExists),
            6003 => Ok(Self::InsufficientStock),
            6004 => Ok(Self::DeviceNotFound),
            6005 => Ok(Self::ExpenseNotFound),

            7001 => Ok(Self::ArchiveFailed),
            7002 => Ok(Self::BookingStillActive),
            7003 => Ok(Self::HistoryNotFound),

            8001 => Ok(Self::SettingNotFound),
            8002 => Ok(Self::InvalidTimezone),
            8003 => Ok(Self::InvalidCutoffTime),

            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            9003 => Ok(Self::ConfigError),
            9004 => Ok(Self::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::BookingNotFound.code(), 1001);
        assert_eq!(ErrorCode::PricingNotFound.code(), 2001);
        assert_eq!(ErrorCode::PromotionExpired.code(), 3002);
        assert_eq!(ErrorCode::InsufficientPoints.code(), 4003);
        assert_eq!(ErrorCode::CreditOverpayment.code(), 5005);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::SeatOccupied,
            ErrorCode::PricingNotFound,
            ErrorCode::PromotionConflict,
            ErrorCode::MemberAlreadyExists,
            ErrorCode::SplitAmountMismatch,
            ErrorCode::FoodItemNotFound,
            ErrorCode::ArchiveFailed,
            ErrorCode::InvalidTimezone,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::SeatOccupied).unwrap();
        assert_eq!(json, "1002");
        let back: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(back, ErrorCode::SeatOccupied);
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(format!("{}", ErrorCode::PromotionExpired), "3002");
    }
}
