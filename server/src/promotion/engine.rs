//! Promotion evaluation
//!
//! Pure functions over promotion rows. Validity is the row's date range
//! plus its enabled flag, judged at an explicit `now`; the caller decides
//! where `now` comes from.

use crate::utils::money::{percent_of, round2};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Promotion, PromotionDetails, PromotionKind, PromotionStatus, PromotionWithStatus,
};

/// Outcome of applying one promotion to a base price.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub final_price: f64,
    /// Extra session minutes granted by a bonus-hours promotion
    pub bonus_minutes: i64,
    pub details: PromotionDetails,
}

/// Derived status at `now`. Disabled wins over everything, then the date
/// range is judged: past, future, or live.
pub fn status_at(promotion: &Promotion, now: i64) -> PromotionStatus {
    if !promotion.enabled {
        PromotionStatus::Disabled
    } else if now > promotion.end_date {
        PromotionStatus::Expired
    } else if now < promotion.start_date {
        PromotionStatus::Scheduled
    } else {
        PromotionStatus::Active
    }
}

pub fn is_valid_at(promotion: &Promotion, now: i64) -> bool {
    status_at(promotion, now) == PromotionStatus::Active
}

/// First promotion live at `now`. The write-time overlap guard keeps two
/// kinds from being live on the same key, so "first" is unambiguous.
pub fn pick_valid(promotions: &[Promotion], now: i64) -> Option<&Promotion> {
    promotions.iter().find(|p| is_valid_at(p, now))
}

/// Attach the derived status for API listings.
pub fn with_status(promotion: Promotion, now: i64) -> PromotionWithStatus {
    let status = status_at(&promotion, now);
    PromotionWithStatus { promotion, status }
}

/// Value sanity per kind: discounts are a percentage, bonuses are hours.
pub fn validate_value(kind: PromotionKind, value: f64) -> AppResult<()> {
    match kind {
        PromotionKind::Discount if !(0.0..=100.0).contains(&value) => {
            Err(AppError::new(ErrorCode::InvalidDiscount))
        }
        PromotionKind::BonusHours if value <= 0.0 => {
            Err(AppError::new(ErrorCode::InvalidBonusHours))
        }
        _ => Ok(()),
    }
}

/// Apply a promotion to a resolved base price.
///
/// Discounts knock a rounded percentage off the price; bonus hours leave
/// the price alone and grant extra minutes instead.
pub fn apply(promotion: &Promotion, base_price: f64) -> Applied {
    match promotion.kind {
        PromotionKind::Discount => {
            let percent = promotion.value.clamp(0.0, 100.0);
            let amount_saved = round2(percent_of(base_price, percent));
            Applied {
                final_price: round2(base_price - amount_saved),
                bonus_minutes: 0,
                details: PromotionDetails::Discount {
                    promotion_id: promotion.id,
                    percent,
                    amount_saved,
                },
            }
        }
        PromotionKind::BonusHours => Applied {
            final_price: base_price,
            bonus_minutes: (promotion.value * 60.0).round() as i64,
            details: PromotionDetails::BonusHours {
                promotion_id: promotion.id,
                hours: promotion.value,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;

    fn promo(kind: PromotionKind, value: f64, start: i64, end: i64, enabled: bool) -> Promotion {
        Promotion {
            id: 7,
            kind,
            category: Category::Ps5,
            duration: "1 hour".into(),
            person_count: 1,
            value,
            start_date: start,
            end_date: end,
            enabled,
            usage_count: 0,
            total_savings: 0.0,
            total_hours_given: 0.0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn disabled_wins_over_dates() {
        let p = promo(PromotionKind::Discount, 20.0, 0, 100, false);
        assert_eq!(status_at(&p, 50), PromotionStatus::Disabled);
        assert_eq!(status_at(&p, 200), PromotionStatus::Disabled);
    }

    #[test]
    fn status_follows_the_date_range() {
        let p = promo(PromotionKind::Discount, 20.0, 100, 200, true);
        assert_eq!(status_at(&p, 99), PromotionStatus::Scheduled);
        assert_eq!(status_at(&p, 100), PromotionStatus::Active);
        assert_eq!(status_at(&p, 200), PromotionStatus::Active);
        assert_eq!(status_at(&p, 201), PromotionStatus::Expired);
    }

    #[test]
    fn valid_means_enabled_and_inside_dates() {
        let p = promo(PromotionKind::Discount, 20.0, 100, 200, true);
        assert!(is_valid_at(&p, 150));
        assert!(!is_valid_at(&p, 99));
        assert!(!is_valid_at(&promo(PromotionKind::Discount, 20.0, 100, 200, false), 150));
    }

    #[test]
    fn pick_valid_skips_dead_rows() {
        let rows = vec![
            promo(PromotionKind::Discount, 10.0, 0, 50, true),
            promo(PromotionKind::BonusHours, 1.0, 100, 200, true),
        ];
        let picked = pick_valid(&rows, 150).unwrap();
        assert_eq!(picked.kind, PromotionKind::BonusHours);
        assert!(pick_valid(&rows, 60).is_none());
    }

    #[test]
    fn twenty_percent_off_five_hundred() {
        let p = promo(PromotionKind::Discount, 20.0, 0, 100, true);
        let applied = apply(&p, 500.0);
        assert_eq!(applied.final_price, 400.0);
        assert_eq!(applied.bonus_minutes, 0);
        assert_eq!(
            applied.details,
            PromotionDetails::Discount {
                promotion_id: 7,
                percent: 20.0,
                amount_saved: 100.0
            }
        );
    }

    #[test]
    fn bonus_hours_keep_the_price() {
        let p = promo(PromotionKind::BonusHours, 1.5, 0, 100, true);
        let applied = apply(&p, 300.0);
        assert_eq!(applied.final_price, 300.0);
        assert_eq!(applied.bonus_minutes, 90);
        assert_eq!(
            applied.details,
            PromotionDetails::BonusHours {
                promotion_id: 7,
                hours: 1.5
            }
        );
    }

    #[test]
    fn value_validation_by_kind() {
        assert!(validate_value(PromotionKind::Discount, 20.0).is_ok());
        assert!(validate_value(PromotionKind::Discount, 101.0).is_err());
        assert!(validate_value(PromotionKind::Discount, -1.0).is_err());
        assert!(validate_value(PromotionKind::BonusHours, 0.5).is_ok());
        assert!(validate_value(PromotionKind::BonusHours, 0.0).is_err());
    }
}
