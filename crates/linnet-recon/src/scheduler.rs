//! Background refresh scheduler.
//!
//! Periodically asks the store which conversations are due for a
//! registration refresh and runs a reconciliation pass over them.
//! Transient failures are logged and retried on the next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info, instrument, warn};

use crate::config::RefreshConfig;
use crate::reconciler::Reconciler;

/// Periodic driver for registration refresh passes.
pub struct RefreshScheduler {
    reconciler: Arc<Reconciler>,
    config: RefreshConfig,
    shutdown: Arc<AtomicBool>,
}

impl RefreshScheduler {
    /// Create a new scheduler.
    #[must_use]
    pub fn new(reconciler: Arc<Reconciler>, config: RefreshConfig) -> Self {
        Self {
            reconciler,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown; takes effect at the next tick. The in-flight
    /// pass, if any, finishes normally. Partially-applied passes are
    /// safe to leave behind, the next run re-derives them as no-ops.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Run the scheduler loop until [`stop`](Self::stop) is called.
    ///
    /// The first pass runs immediately on start, then every
    /// `poll_interval_secs`.
    #[instrument(skip(self))]
    pub async fn run(&self) {
        info!(
            poll_interval_secs = self.config.poll_interval_secs,
            batch_limit = self.config.batch_limit,
            "Starting refresh scheduler"
        );

        let mut tick = interval(Duration::from_secs(self.config.poll_interval_secs));
        loop {
            tick.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Scheduler shutdown requested, stopping");
                break;
            }
            self.refresh_once().await;
        }
    }

    /// One scheduled refresh pass.
    async fn refresh_once(&self) {
        match self.reconciler.reconcile_stale(self.config.batch_limit).await {
            Ok(summary) if summary.outcomes.is_empty() => {
                debug!("No stale conversations");
            }
            Ok(summary) => {
                info!(
                    processed = summary.statistics.conversations_processed,
                    failures = summary.statistics.failures,
                    "Refresh pass complete"
                );
            }
            Err(err) if err.is_retryable() => {
                warn!(error = %err, "Refresh pass failed, will retry next tick");
            }
            Err(err) => {
                warn!(error = %err, "Refresh pass failed");
            }
        }
    }
}
