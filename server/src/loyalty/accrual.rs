//! Points accrual
//!
//! A completed visit earns the flat per-visit award plus one spend-bracket
//! award. Brackets are inclusive on both edges; the last bracket leaves its
//! upper edge open. Tier follows lifetime points, which never go down.

use shared::models::{LoyaltyConfig, LoyaltyTier};

/// Points from the spend brackets for one bill total.
pub fn bracket_points(config: &LoyaltyConfig, spend: f64) -> i64 {
    config
        .brackets
        .iter()
        .find(|b| spend >= b.min && b.max.is_none_or(|max| spend <= max))
        .map(|b| b.points)
        .unwrap_or(0)
}

/// Total award for one completed visit.
pub fn points_for_visit(config: &LoyaltyConfig, spend: f64) -> i64 {
    config.points_per_visit + bracket_points(config, spend)
}

/// Tier for a lifetime-points balance.
pub fn tier_for(config: &LoyaltyConfig, lifetime_points: i64) -> LoyaltyTier {
    if lifetime_points >= config.platinum_threshold {
        LoyaltyTier::Platinum
    } else if lifetime_points >= config.gold_threshold {
        LoyaltyTier::Gold
    } else if lifetime_points >= config.silver_threshold {
        LoyaltyTier::Silver
    } else {
        LoyaltyTier::Bronze
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_brackets_award_by_spend() {
        let cfg = LoyaltyConfig::default();
        assert_eq!(bracket_points(&cfg, 0.0), 5);
        assert_eq!(bracket_points(&cfg, 100.0), 5);
        assert_eq!(bracket_points(&cfg, 101.0), 15);
        assert_eq!(bracket_points(&cfg, 300.0), 15);
        assert_eq!(bracket_points(&cfg, 450.0), 30);
        assert_eq!(bracket_points(&cfg, 501.0), 50);
        // Last bracket has no upper edge
        assert_eq!(bracket_points(&cfg, 1_000_000.0), 50);
    }

    #[test]
    fn spend_of_250_earns_25_points() {
        let cfg = LoyaltyConfig::default();
        assert_eq!(points_for_visit(&cfg, 250.0), 25);
    }

    #[test]
    fn spend_between_brackets_earns_only_the_visit_award() {
        let cfg = LoyaltyConfig::default();
        // 100.5 falls in the gap between the 0-100 and 101-300 brackets.
        assert_eq!(points_for_visit(&cfg, 100.5), cfg.points_per_visit);
    }

    #[test]
    fn tier_thresholds() {
        let cfg = LoyaltyConfig::default();
        assert_eq!(tier_for(&cfg, 0), LoyaltyTier::Bronze);
        assert_eq!(tier_for(&cfg, 99), LoyaltyTier::Bronze);
        assert_eq!(tier_for(&cfg, 100), LoyaltyTier::Silver);
        assert_eq!(tier_for(&cfg, 499), LoyaltyTier::Silver);
        assert_eq!(tier_for(&cfg, 500), LoyaltyTier::Gold);
        assert_eq!(tier_for(&cfg, 999), LoyaltyTier::Gold);
        assert_eq!(tier_for(&cfg, 1000), LoyaltyTier::Platinum);
    }
}
