//! Domain models for the arcade booking system
//!
//! Every entity follows the same layout: the stored row struct (deriving
//! `sqlx::FromRow` behind the `db` feature), plus `Create`/`Update` payload
//! structs for the API surface. Timestamps are Unix millis (i64), money is
//! f64 at the model edge and `rust_decimal` inside calculations.

pub mod booking;
pub mod catalog;
pub mod credit;
pub mod expense;
pub mod loyalty;
pub mod pricing;
pub mod promotion;
pub mod report;
pub mod settings;

pub use booking::{
    ArchiveFailure, Booking, BookingComplete, BookingCreate, BookingExtend, BookingHistory,
    BookingStatus, BookingType, BookingUpdate, Category, FoodOrderLine, GroupCreate,
    PaymentMethod, PaymentStatus, RefreshReport, SessionGroup,
};
pub use catalog::{
    DeviceConfig, DeviceConfigUpsert, FoodItem, FoodItemCreate, FoodItemUpdate, StockAdjust,
    StockAdjustKind, seat_names,
};
pub use credit::{
    CreditAccount, CreditEntry, CreditEntryStatus, CreditPayment, CreditPaymentCreate,
};
pub use expense::{Expense, ExpenseCreate, ExpenseUpdate};
pub use loyalty::{
    LoyaltyConfig, LoyaltyMember, LoyaltyMemberCreate, LoyaltyMemberUpdate, LoyaltyRedemption,
    LoyaltyReward, LoyaltyRewardCreate, LoyaltyRewardUpdate, LoyaltyTier, SpendBracket,
};
pub use pricing::{
    HappyHoursWindow, HappyHoursWindowCreate, HappyHoursWindowUpdate, PriceQuote, PricingConfig,
    PricingConfigCreate, PricingConfigUpdate, QuoteRequest, Tariff,
};
pub use promotion::{
    Promotion, PromotionCreate, PromotionDetails, PromotionKind, PromotionStatus, PromotionUpdate,
    PromotionWithStatus,
};
pub use report::{CategoryRevenue, FoodSales, ReportPeriod, RevenueReport, StatusCount};
pub use settings::{Setting, keys as setting_keys};
