//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! When file output is active, rolled logs are swept hourly and deleted
//! after the retention window.

use std::fs;
use std::path::{Path, PathBuf};

/// Rolled log files older than this are deleted by the hourly sweep.
const LOG_RETENTION_DAYS: i64 = 14;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// When `log_dir` points at an existing directory, output goes to a daily
/// rolling file (`arcade-server.YYYY-MM-DD`) instead of stdout, and the
/// retention sweep starts alongside.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "arcade-server");
            tokio::spawn(periodic_cleanup(log_path.to_path_buf()));
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}

/// Delete rolled `arcade-server.YYYY-MM-DD` files past the retention window.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name.strip_prefix("arcade-server.")
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }
    Ok(())
}

/// Hourly retention sweep; runs for the life of the process.
async fn periodic_cleanup(log_dir: PathBuf) {
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to clean up old logs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_removes_only_stale_rolled_logs() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("arcade-server.2020-01-01");
        let other = dir.path().join("notes.txt");
        fs::write(&stale, "old").unwrap();
        fs::write(&other, "keep").unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        assert!(!stale.exists());
        assert!(other.exists());
    }

    #[test]
    fn cleanup_keeps_recent_logs() {
        let dir = tempfile::tempdir().unwrap();
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
        let fresh = dir.path().join(format!("arcade-server.{today}"));
        fs::write(&fresh, "new").unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        assert!(fresh.exists());
    }
}
