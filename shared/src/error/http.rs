//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::BookingNotFound
            | Self::GroupNotFound
            | Self::PricingNotFound
            | Self::WindowNotFound
            | Self::PromotionNotFound
            | Self::MemberNotFound
            | Self::RewardNotFound
            | Self::CreditAccountNotFound
            | Self::CreditEntryNotFound
            | Self::FoodItemNotFound
            | Self::DeviceNotFound
            | Self::ExpenseNotFound
            | Self::HistoryNotFound
            | Self::SettingNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::SeatOccupied
            | Self::BookingAlreadyFinished
            | Self::DuplicatePricing
            | Self::PromotionConflict
            | Self::MemberAlreadyExists
            | Self::FoodItemNameExists
            | Self::CreditEntryAlreadyPaid => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (resource exists but is not usable right now)
            Self::PromotionExpired
            | Self::PromotionDisabled
            | Self::PromotionNotStarted
            | Self::RewardDisabled
            | Self::RewardOutOfStock => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::ArchiveFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::BookingNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::PricingNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::MemberNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::SeatOccupied.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::DuplicatePricing.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::PromotionConflict.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_unprocessable_status() {
        assert_eq!(
            ErrorCode::PromotionExpired.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::PromotionDisabled.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::RewardOutOfStock.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_validation_defaults_to_bad_request() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidPersonCount.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InsufficientPoints.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::CreditOverpayment.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::EndBeforeStart.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::ArchiveFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
