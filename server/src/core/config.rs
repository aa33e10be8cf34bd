use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HOST | 127.0.0.1 | Bind address |
/// | PORT | 3000 | HTTP port |
/// | DB_PATH | data/arcade.db | SQLite database file |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Tracing level filter |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
/// | SWEEP_INTERVAL_MS | 5000 | Status sweep period |
/// | ARCHIVE_SWEEP_TIME | 02:00 | Daily archive pass, local time (settings row wins) |
/// | ARCHIVE_EXPIRED | true | Archive expired bookings too (settings row wins) |
/// | TIMEZONE | Asia/Kolkata | Fallback when no timezone setting is stored |
///
/// # Example
///
/// ```ignore
/// PORT=8080 DB_PATH=/data/arcade.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server
    pub host: String,
    /// HTTP API port
    pub port: u16,
    /// SQLite database file, created on first run
    pub db_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Tracing level filter
    pub log_level: String,
    /// Log directory; stdout when unset
    pub log_dir: Option<String>,
    /// Booking status sweep period (milliseconds)
    pub sweep_interval_ms: u64,
    /// Daily archive pass time, overridden by the settings row when present
    pub archive_sweep_time: String,
    /// Whether expired bookings are archived; the settings row wins once stored
    pub archive_expired: bool,
    /// Business timezone fallback; the settings row wins once stored
    pub timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults above.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "data/arcade.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            sweep_interval_ms: std::env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            archive_sweep_time: std::env::var("ARCHIVE_SWEEP_TIME")
                .unwrap_or_else(|_| "02:00".into()),
            archive_expired: std::env::var("ARCHIVE_EXPIRED")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(true),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|name| name.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
        }
    }

    /// Override the fields tests care about.
    pub fn with_overrides(db_path: impl Into<String>, port: u16) -> Self {
        let mut config = Self::from_env();
        config.db_path = db_path.into();
        config.port = port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
