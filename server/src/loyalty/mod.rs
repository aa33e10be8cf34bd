//! Loyalty - accrual on completion, tiers, reward redemption

pub mod accrual;

use sqlx::SqlitePool;

use crate::db::repository::{RepoError, loyalty as loyalty_repo, settings as settings_repo};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LoyaltyMember, LoyaltyMemberCreate, LoyaltyRedemption};

/// Credit one completed visit to the member keyed by `phone`, creating the
/// member on first accrual. Awards points for the bill total and recomputes
/// the tier from the new lifetime balance.
pub async fn accrue_visit(
    pool: &SqlitePool,
    name: &str,
    phone: &str,
    bill_total: f64,
    now: i64,
) -> AppResult<LoyaltyMember> {
    let member = match loyalty_repo::find_member_by_phone(pool, phone).await? {
        Some(member) => member,
        None => {
            let member = loyalty_repo::insert_member(
                pool,
                LoyaltyMemberCreate {
                    name: name.to_string(),
                    phone: phone.to_string(),
                },
            )
            .await?;
            tracing::info!("Loyalty: new member {} ({})", member.name, member.phone);
            member
        }
    };

    let config = settings_repo::loyalty_config(pool).await?;
    let points = accrual::points_for_visit(&config, bill_total);
    let tier = accrual::tier_for(&config, member.lifetime_points + points);

    let updated = loyalty_repo::record_visit(pool, member.id, points, tier, bill_total, now).await?;
    tracing::info!(
        "Loyalty: member {} earned {} points for ₹{:.2} ({:?})",
        member.id,
        points,
        bill_total,
        updated.tier
    );
    Ok(updated)
}

/// Spend points on a reward.
pub async fn redeem(
    pool: &SqlitePool,
    member_id: i64,
    reward_id: i64,
    now: i64,
) -> AppResult<LoyaltyRedemption> {
    let member = loyalty_repo::find_member(pool, member_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound))?;
    let reward = loyalty_repo::find_reward(pool, reward_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RewardNotFound))?;

    if !reward.enabled {
        return Err(AppError::new(ErrorCode::RewardDisabled));
    }
    if reward.stock.is_some_and(|s| s < 1) {
        return Err(AppError::new(ErrorCode::RewardOutOfStock));
    }
    if member.points < reward.point_cost {
        return Err(AppError::insufficient_points(reward.point_cost, member.points));
    }

    // The repository re-checks balance and stock inside the transaction;
    // a lost race surfaces as the same typed errors.
    let redemption = loyalty_repo::apply_redemption(pool, member_id, &reward, now)
        .await
        .map_err(|e| match e {
            RepoError::Validation(msg) if msg.contains("stock") => {
                AppError::new(ErrorCode::RewardOutOfStock)
            }
            RepoError::Validation(_) => {
                AppError::insufficient_points(reward.point_cost, member.points)
            }
            other => other.into(),
        })?;

    tracing::info!(
        "Loyalty: member {} redeemed \"{}\" for {} points",
        member_id,
        redemption.reward_name,
        redemption.points_spent
    );
    Ok(redemption)
}
