//! Arcade Server - gaming center booking and billing engine
//!
//! # Overview
//!
//! Single-process HTTP server for a gaming center point of sale:
//!
//! - **Bookings** (`booking`): seat sessions with a pause/resume/extend
//!   lifecycle, swept to terminal states by a background task
//! - **Pricing** (`pricing`): per-category rate cards with happy-hours
//!   windows deciding which table a lookup hits
//! - **Promotions** (`promotion`): discount and bonus-hours rules applied
//!   at quote time
//! - **Loyalty** (`loyalty`): visit accrual, tiers, reward redemption
//! - **Reports** (`reports`): revenue aggregation over active and
//!   archived bookings
//! - **HTTP API** (`api`): RESTful JSON interface
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly and middleware stack
//! ├── booking/       # lifecycle service, sweeper, archiver
//! ├── pricing/       # tariff resolution and quotes
//! ├── promotion/     # promotion evaluation
//! ├── loyalty/       # accrual and redemption
//! ├── reports/       # revenue aggregation
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # logging, money, time, validation
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod loyalty;
pub mod pricing;
pub mod promotion;
pub mod reports;
pub mod routes;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env` and bring up logging from the environment. Must run before
/// anything logs; tracing installs a global subscriber exactly once.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    _    ____   ____    _    ____  _____
   / \  |  _ \ / ___|  / \  |  _ \| ____|
  / _ \ | |_) | |     / _ \ | | | |  _|
 / ___ \|  _ <| |___ / ___ \| |_| | |___
/_/   \_\_| \_\\____/_/   \_\____/|_____|
    "#
    );
}
