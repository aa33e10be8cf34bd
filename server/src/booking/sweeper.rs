//! Booking status sweeper
//!
//! Flips `upcoming` bookings to `running` and `running` past their end to
//! `expired` on a short interval, so reads always see fresh statuses even
//! when no handler has touched the row. Both transitions are idempotent
//! guarded UPDATEs; a missed tick costs nothing but latency.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::db::repository::booking as booking_repo;
use shared::now_millis;

/// Periodic status sweep.
///
/// Registered as `TaskKind::Periodic` in `start_background_tasks()`.
pub struct StatusSweeper {
    state: ServerState,
    shutdown: CancellationToken,
}

impl StatusSweeper {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        let period = Duration::from_millis(self.state.config.sweep_interval_ms.max(500));
        tracing::info!("Status sweeper started (every {:?})", period);

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.sweep_once().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Status sweeper received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn sweep_once(&self) {
        match booking_repo::sweep_transitions(&self.state.pool, now_millis()).await {
            Ok((started, expired)) => {
                if started > 0 || expired > 0 {
                    tracing::debug!(started, expired, "Booking status sweep");
                }
            }
            Err(e) => {
                tracing::error!("Booking status sweep failed: {}", e);
            }
        }
    }
}
