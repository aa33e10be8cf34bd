//! Settings Model - key/value store for operator-tunable values

use serde::{Deserialize, Serialize};

/// One settings row. Values are stored as JSON text, so strings carry
/// their quotes and the loyalty config is a full JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

/// Well-known settings keys
pub mod keys {
    /// IANA timezone the center operates in ("Asia/Kolkata")
    pub const TIMEZONE: &str = "timezone";
    /// JSON-encoded [`crate::models::loyalty::LoyaltyConfig`]
    pub const LOYALTY_CONFIG: &str = "loyalty_config";
    /// HH:MM local time for the nightly archive sweep
    pub const ARCHIVE_SWEEP_TIME: &str = "archive_sweep_time";
    /// "true"/"false": whether the scheduled sweep archives expired bookings
    pub const ARCHIVE_EXPIRED: &str = "archive_expired";
}
