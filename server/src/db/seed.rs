//! First-run defaults
//!
//! Seeds device configs, regular pricing, the food menu and the settings
//! rows a fresh center needs. Guarded by the device-config count so a
//! restart never duplicates rows.

use sqlx::SqlitePool;

use shared::models::{Category, LoyaltyConfig, seat_names, setting_keys};
use shared::{now_millis, snowflake_id};

const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_ARCHIVE_SWEEP_TIME: &str = "02:00";

/// Populate an empty database with the stock configuration.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let devices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM device_configs")
        .fetch_one(pool)
        .await?;
    if devices > 0 {
        seed_settings(pool).await?;
        return Ok(());
    }

    let now = now_millis();

    for (category, count) in [(Category::Pc, 5_i64), (Category::Ps5, 3_i64)] {
        let seats = seat_names(category, count);
        sqlx::query(
            "INSERT INTO device_configs (id, category, seat_count, seats, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(category)
        .bind(count)
        .bind(serde_json::to_string(&seats).unwrap_or_else(|_| "[]".into()))
        .bind(now)
        .execute(pool)
        .await?;
    }

    let pricing: [(Category, &str, f64); 6] = [
        (Category::Pc, "30 mins", 10.0),
        (Category::Pc, "1 hour", 18.0),
        (Category::Pc, "2 hours", 30.0),
        (Category::Ps5, "30 mins", 15.0),
        (Category::Ps5, "1 hour", 25.0),
        (Category::Ps5, "2 hours", 45.0),
    ];
    for (category, duration, price) in pricing {
        sqlx::query(
            "INSERT INTO pricing_configs (id, category, duration, person_count, price, created_at) VALUES (?, ?, ?, 1, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(category)
        .bind(duration)
        .bind(price)
        .bind(now)
        .execute(pool)
        .await?;
    }

    let menu: [(&str, f64); 10] = [
        ("Pizza", 8.0),
        ("Burger", 6.0),
        ("Fries", 3.0),
        ("Soda", 2.0),
        ("Water", 1.0),
        ("Sandwich", 5.0),
        ("Hot Dog", 4.0),
        ("Coffee", 3.0),
        ("Energy Drink", 4.0),
        ("Nachos", 5.0),
    ];
    for (name, price) in menu {
        sqlx::query(
            "INSERT INTO food_items (id, name, price, current_stock, min_stock_level, created_at) VALUES (?, ?, ?, 0, 10, ?)",
        )
        .bind(snowflake_id())
        .bind(name)
        .bind(price)
        .bind(now)
        .execute(pool)
        .await?;
    }

    seed_settings(pool).await?;

    tracing::info!("Database initialized with default data");
    Ok(())
}

/// Settings rows are seeded independently so upgrades backfill new keys.
async fn seed_settings(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let now = now_millis();
    let loyalty = serde_json::to_string(&LoyaltyConfig::default())
        .unwrap_or_else(|_| "null".into());

    let defaults: [(&str, String); 4] = [
        (
            setting_keys::TIMEZONE,
            serde_json::to_string(DEFAULT_TIMEZONE).unwrap_or_default(),
        ),
        (setting_keys::LOYALTY_CONFIG, loyalty),
        (
            setting_keys::ARCHIVE_SWEEP_TIME,
            serde_json::to_string(DEFAULT_ARCHIVE_SWEEP_TIME).unwrap_or_default(),
        ),
        (setting_keys::ARCHIVE_EXPIRED, "true".into()),
    ];

    for (key, value) in defaults {
        sqlx::query(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?) ON CONFLICT(key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = DbService::in_memory().await.unwrap();
        seed_defaults(&db.pool).await.unwrap();
        seed_defaults(&db.pool).await.unwrap();

        let pricing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing_configs")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(pricing, 6);

        let food: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_items")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(food, 10);

        let tz: String = sqlx::query_scalar("SELECT value FROM settings WHERE key = 'timezone'")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(tz, "\"Asia/Kolkata\"");
    }
}
