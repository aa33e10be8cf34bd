//! Loyalty Repository
//!
//! Members, rewards and redemptions. Accrual math lives in the loyalty
//! service; this layer persists the outcome. `lifetime_points` only ever
//! grows, redemptions spend from `points` alone.

use super::{RepoError, RepoResult};
use shared::models::{
    LoyaltyMember, LoyaltyMemberCreate, LoyaltyMemberUpdate, LoyaltyRedemption, LoyaltyReward,
    LoyaltyRewardCreate, LoyaltyRewardUpdate, LoyaltyTier,
};
use shared::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, name, phone, points, lifetime_points, tier, total_spent, visit_count, created_at, updated_at FROM loyalty_members";

const REWARD_SELECT: &str =
    "SELECT id, name, description, point_cost, value, enabled, stock, created_at FROM loyalty_rewards";

const REDEMPTION_SELECT: &str =
    "SELECT id, member_id, reward_id, reward_name, points_spent, redeemed_at FROM loyalty_redemptions";

pub async fn find_all_members(pool: &SqlitePool) -> RepoResult<Vec<LoyaltyMember>> {
    let sql = format!("{} ORDER BY lifetime_points DESC", MEMBER_SELECT);
    let rows = sqlx::query_as::<_, LoyaltyMember>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_member(pool: &SqlitePool, id: i64) -> RepoResult<Option<LoyaltyMember>> {
    let sql = format!("{} WHERE id = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, LoyaltyMember>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_member_by_phone(
    pool: &SqlitePool,
    phone: &str,
) -> RepoResult<Option<LoyaltyMember>> {
    let sql = format!("{} WHERE phone = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, LoyaltyMember>(&sql)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_member(
    pool: &SqlitePool,
    data: LoyaltyMemberCreate,
) -> RepoResult<LoyaltyMember> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO loyalty_members (id, name, phone, points, lifetime_points, tier, total_spent, visit_count, created_at, updated_at) VALUES (?, ?, ?, 0, 0, 'bronze', 0, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_member(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create loyalty member".into()))
}

pub async fn update_member(
    pool: &SqlitePool,
    id: i64,
    data: LoyaltyMemberUpdate,
) -> RepoResult<LoyaltyMember> {
    let rows = sqlx::query(
        "UPDATE loyalty_members SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.phone)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_member(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

/// Persist one completed visit: points and spend accumulate, the tier is
/// whatever the caller computed from the new lifetime balance.
pub async fn record_visit(
    pool: &SqlitePool,
    id: i64,
    points_awarded: i64,
    tier: LoyaltyTier,
    spend: f64,
    now: i64,
) -> RepoResult<LoyaltyMember> {
    let rows = sqlx::query(
        "UPDATE loyalty_members SET points = points + ?1, lifetime_points = lifetime_points + ?1, tier = ?2, total_spent = total_spent + ?3, visit_count = visit_count + 1, updated_at = ?4 WHERE id = ?5",
    )
    .bind(points_awarded)
    .bind(tier)
    .bind(spend)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_member(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

pub async fn find_rewards(pool: &SqlitePool) -> RepoResult<Vec<LoyaltyReward>> {
    let sql = format!("{} ORDER BY point_cost", REWARD_SELECT);
    let rows = sqlx::query_as::<_, LoyaltyReward>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_reward(pool: &SqlitePool, id: i64) -> RepoResult<Option<LoyaltyReward>> {
    let sql = format!("{} WHERE id = ?", REWARD_SELECT);
    let row = sqlx::query_as::<_, LoyaltyReward>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_reward(
    pool: &SqlitePool,
    data: LoyaltyRewardCreate,
) -> RepoResult<LoyaltyReward> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO loyalty_rewards (id, name, description, point_cost, value, enabled, stock, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.point_cost)
    .bind(data.value)
    .bind(data.enabled.unwrap_or(true))
    .bind(data.stock)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_reward(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reward".into()))
}

pub async fn update_reward(
    pool: &SqlitePool,
    id: i64,
    data: LoyaltyRewardUpdate,
) -> RepoResult<LoyaltyReward> {
    let rows = sqlx::query(
        "UPDATE loyalty_rewards SET name = COALESCE(?1, name), description = COALESCE(?2, description), point_cost = COALESCE(?3, point_cost), value = COALESCE(?4, value), enabled = COALESCE(?5, enabled), stock = COALESCE(?6, stock) WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.point_cost)
    .bind(data.value)
    .bind(data.enabled)
    .bind(data.stock)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reward {id} not found")));
    }
    find_reward(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reward {id} not found")))
}

pub async fn delete_reward(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM loyalty_rewards WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn find_redemptions(
    pool: &SqlitePool,
    member_id: Option<i64>,
) -> RepoResult<Vec<LoyaltyRedemption>> {
    let sql = format!(
        "{} WHERE ?1 IS NULL OR member_id = ?1 ORDER BY redeemed_at DESC",
        REDEMPTION_SELECT
    );
    let rows = sqlx::query_as::<_, LoyaltyRedemption>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Spend points on a reward: balance debit, stock debit (when finite) and
/// the redemption record, all in one transaction. The guards re-check
/// balance and stock so a concurrent redemption cannot overspend.
pub async fn apply_redemption(
    pool: &SqlitePool,
    member_id: i64,
    reward: &LoyaltyReward,
    now: i64,
) -> RepoResult<LoyaltyRedemption> {
    let mut tx = pool.begin().await?;

    let debited = sqlx::query(
        "UPDATE loyalty_members SET points = points - ?1, updated_at = ?2 WHERE id = ?3 AND points >= ?1",
    )
    .bind(reward.point_cost)
    .bind(now)
    .bind(member_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();
    if debited == 0 {
        tx.rollback().await?;
        return Err(RepoError::Validation("Not enough points".into()));
    }

    if reward.stock.is_some() {
        let taken = sqlx::query(
            "UPDATE loyalty_rewards SET stock = stock - 1 WHERE id = ? AND stock > 0",
        )
        .bind(reward.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if taken == 0 {
            tx.rollback().await?;
            return Err(RepoError::Validation("Reward is out of stock".into()));
        }
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO loyalty_redemptions (id, member_id, reward_id, reward_name, points_spent, redeemed_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(member_id)
    .bind(reward.id)
    .bind(&reward.name)
    .bind(reward.point_cost)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let sql = format!("{} WHERE id = ?", REDEMPTION_SELECT);
    sqlx::query_as::<_, LoyaltyRedemption>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to record redemption".into()))
}
