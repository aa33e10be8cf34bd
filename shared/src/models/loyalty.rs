//! Loyalty Model
//!
//! Members accrue points when a booking completes: a flat per-visit award
//! plus a spend-bracket award. Tier is recomputed from the lifetime points
//! balance on every accrual. Redemptions spend points on rewards.

use serde::{Deserialize, Serialize};

/// Tier ladder. Thresholds live in [`LoyaltyConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Loyalty member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyMember {
    pub id: i64,
    pub name: String,
    /// WhatsApp number, unique per member
    pub phone: String,
    /// Spendable balance
    pub points: i64,
    /// Lifetime accrued points; drives the tier, never decremented
    pub lifetime_points: i64,
    pub tier: LoyaltyTier,
    pub total_spent: f64,
    pub visit_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyMemberCreate {
    pub name: String,
    pub phone: String,
}

/// Update member payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoyaltyMemberUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Redeemable reward entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyReward {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub point_cost: i64,
    /// Monetary value for reporting ("free 30 mins" ~ 10.0)
    pub value: f64,
    pub enabled: bool,
    /// None = unlimited
    pub stock: Option<i64>,
    pub created_at: i64,
}

/// Create reward payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyRewardCreate {
    pub name: String,
    pub description: Option<String>,
    pub point_cost: i64,
    pub value: f64,
    #[serde(default)]
    pub enabled: Option<bool>,
    pub stock: Option<i64>,
}

/// Update reward payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoyaltyRewardUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub point_cost: Option<i64>,
    pub value: Option<f64>,
    pub enabled: Option<bool>,
    pub stock: Option<i64>,
}

/// A completed redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyRedemption {
    pub id: i64,
    pub member_id: i64,
    pub reward_id: i64,
    pub reward_name: String,
    pub points_spent: i64,
    pub redeemed_at: i64,
}

/// One spend bracket: spend in [min, max] earns `points`
///
/// The last bracket leaves `max` as None for an unbounded upper edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendBracket {
    pub min: f64,
    pub max: Option<f64>,
    pub points: i64,
}

/// Accrual rules, stored as a JSON settings value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoyaltyConfig {
    /// Flat award per completed visit
    pub points_per_visit: i64,
    /// Spend-bracket awards, evaluated against the booking's total bill
    pub brackets: Vec<SpendBracket>,
    /// Lifetime-points thresholds for each tier above bronze
    pub silver_threshold: i64,
    pub gold_threshold: i64,
    pub platinum_threshold: i64,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            points_per_visit: 10,
            brackets: vec![
                SpendBracket {
                    min: 0.0,
                    max: Some(100.0),
                    points: 5,
                },
                SpendBracket {
                    min: 101.0,
                    max: Some(300.0),
                    points: 15,
                },
                SpendBracket {
                    min: 301.0,
                    max: Some(500.0),
                    points: 30,
                },
                SpendBracket {
                    min: 501.0,
                    max: None,
                    points: 50,
                },
            ],
            silver_threshold: 100,
            gold_threshold: 500,
            platinum_threshold: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_wire_values() {
        assert_eq!(
            serde_json::to_string(&LoyaltyTier::Platinum).unwrap(),
            "\"platinum\""
        );
    }

    #[test]
    fn tier_ordering() {
        assert!(LoyaltyTier::Bronze < LoyaltyTier::Silver);
        assert!(LoyaltyTier::Silver < LoyaltyTier::Gold);
        assert!(LoyaltyTier::Gold < LoyaltyTier::Platinum);
    }

    #[test]
    fn default_config_round_trips() {
        let cfg = LoyaltyConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LoyaltyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
        assert_eq!(back.brackets.len(), 4);
        assert!(back.brackets[3].max.is_none());
    }
}
