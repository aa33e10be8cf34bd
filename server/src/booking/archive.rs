//! Booking archival
//!
//! Terminal bookings are moved row-by-row into `booking_history`, each in
//! its own transaction, so one bad row never blocks the rest of the batch.
//! Failures are reported and left in place for the next pass; there are no
//! in-process retries.
//!
//! [`refresh`] is the one-shot pass (also exposed over the API);
//! [`ArchiveScheduler`] runs it daily at the configured sweep time and
//! listens on `config_notify` so a changed time or timezone takes effect
//! without a restart.

use std::sync::Arc;

use chrono::NaiveTime;
use sqlx::SqlitePool;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::db::repository::{
    booking as booking_repo, history as history_repo, settings as settings_repo,
};
use crate::utils::time;
use shared::error::AppResult;
use shared::models::{ArchiveFailure, RefreshReport, setting_keys};
use shared::now_millis;

/// Whether expired (unpaid, timed-out) bookings are archived alongside
/// completed ones. The settings row wins; `fallback` is the configured
/// default when no row is stored.
pub async fn archive_expired_enabled(pool: &SqlitePool, fallback: bool) -> AppResult<bool> {
    Ok(settings_repo::get_json::<bool>(pool, setting_keys::ARCHIVE_EXPIRED)
        .await?
        .unwrap_or(fallback))
}

/// Sweep statuses, then archive every terminal booking.
///
/// The report lists what moved and what failed; callers decide whether a
/// non-empty `failed` list is worth alerting on.
pub async fn refresh(state: &ServerState, now: i64) -> AppResult<RefreshReport> {
    let pool = &state.pool;
    let (started, expired) = booking_repo::sweep_transitions(pool, now).await?;
    let include_expired = archive_expired_enabled(pool, state.config.archive_expired).await?;

    let mut report = RefreshReport {
        transitioned: started + expired,
        ..Default::default()
    };

    for booking in booking_repo::find_archivable(pool, include_expired).await? {
        match history_repo::archive_booking(pool, booking.id, now).await {
            Ok(_) => report.archived.push(booking.id),
            Err(e) => {
                tracing::warn!(
                    booking_id = booking.id,
                    "Failed to archive booking {}: {}",
                    booking.booking_code,
                    e
                );
                report.failed.push(ArchiveFailure {
                    booking_id: booking.id,
                    reason: e.to_string(),
                });
            }
        }
    }

    if !report.archived.is_empty() || !report.failed.is_empty() {
        tracing::info!(
            archived = report.archived.len(),
            failed = report.failed.len(),
            transitioned = report.transitioned,
            "Archive pass finished"
        );
    }
    Ok(report)
}

/// Daily archive scheduler.
///
/// Registered as `TaskKind::Periodic`, started in `start_background_tasks()`.
pub struct ArchiveScheduler {
    state: ServerState,
    shutdown: CancellationToken,
    config_notify: Arc<Notify>,
}

impl ArchiveScheduler {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        let config_notify = state.config_notify.clone();
        Self {
            state,
            shutdown,
            config_notify,
        }
    }

    pub async fn run(self) {
        tracing::info!("Archive scheduler started");

        loop {
            let sweep_time = self.sweep_time().await;
            let tz = self.state.timezone().await;
            let sleep_duration = time::duration_until_next(sweep_time, tz);

            tracing::info!(
                "Next archive pass in {} minutes (at {} {})",
                sleep_duration.as_secs() / 60,
                sweep_time.format("%H:%M"),
                tz
            );

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    if let Err(e) = refresh(&self.state, now_millis()).await {
                        tracing::error!("Scheduled archive pass failed: {}", e);
                    }
                }
                // Settings changed: recompute the next trigger, nothing else.
                _ = self.config_notify.notified() => {
                    tracing::info!("Settings changed, recalculating next archive pass");
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Archive scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    /// Sweep time of day, read fresh from settings each cycle.
    async fn sweep_time(&self) -> NaiveTime {
        let stored = settings_repo::get_json::<String>(
            &self.state.pool,
            setting_keys::ARCHIVE_SWEEP_TIME,
        )
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| self.state.config.archive_sweep_time.clone());

        time::parse_cutoff(&stored)
    }
}
