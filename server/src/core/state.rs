use std::path::Path;
use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::SqlitePool;
use tokio::sync::Notify;

use crate::booking::archive::ArchiveScheduler;
use crate::booking::sweeper::StatusSweeper;
use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db::repository::settings as settings_repo;
use crate::db::{DbService, seed};

/// Shared server state
///
/// Cloned into every handler and background task; all fields are cheap to
/// clone (the pool is an `Arc` internally).
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Environment configuration, immutable after startup |
/// | pool | SQLite connection pool |
/// | config_notify | Pinged when settings change so schedulers re-read them |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub config_notify: Arc<Notify>,
}

impl ServerState {
    /// Open the database, run migrations, seed first-run defaults.
    pub async fn initialize(config: &Config) -> Result<Self, sqlx::Error> {
        if let Some(parent) = Path::new(&config.db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }

        let db = DbService::new(&config.db_path).await?;
        seed::seed_defaults(&db.pool).await?;

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            config_notify: Arc::new(Notify::new()),
        })
    }

    /// State over an in-memory database. Used by tests.
    pub async fn in_memory(config: Config) -> Result<Self, sqlx::Error> {
        let db = DbService::in_memory().await?;
        seed::seed_defaults(&db.pool).await?;

        Ok(Self {
            config,
            pool: db.pool,
            config_notify: Arc::new(Notify::new()),
        })
    }

    /// Business timezone: the settings row when stored and parseable,
    /// otherwise the configured fallback.
    pub async fn timezone(&self) -> Tz {
        match settings_repo::timezone_name(&self.pool).await {
            Ok(Some(name)) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Stored timezone {:?} is not a valid IANA name, using {}",
                    name,
                    self.config.timezone
                );
                self.config.timezone
            }),
            Ok(None) => self.config.timezone,
            Err(e) => {
                tracing::warn!("Failed to read timezone setting: {}, using {}", e, self.config.timezone);
                self.config.timezone
            }
        }
    }

    /// Wake schedulers that cache settings-derived values.
    pub fn notify_config_changed(&self) {
        self.config_notify.notify_waiters();
    }

    /// Register and start the background passes.
    ///
    /// Must be called before `Server::run()`; the returned manager owns the
    /// shutdown token.
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let sweeper = StatusSweeper::new(self.clone(), tasks.shutdown_token());
        tasks.spawn("status_sweeper", TaskKind::Periodic, sweeper.run());

        let archiver = ArchiveScheduler::new(self.clone(), tasks.shutdown_token());
        tasks.spawn("archive_scheduler", TaskKind::Periodic, archiver.run());

        tasks.log_summary();
        tasks
    }
}
