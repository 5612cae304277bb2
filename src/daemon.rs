//! Daemon module for dme-ddns
//!
//! Drives the reconciliation cycle once or on a fixed interval, and owns the
//! shutdown path for interval mode.

use std::time::Duration;

use anyhow::{Context as _, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::oneshot;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::SyncError;
use crate::sync::{Reconciler, SyncOutcome};

//==============================================================================
// Shutdown
//==============================================================================

/// Write-once shutdown notification
///
/// The first trigger closes the channel; later triggers are no-ops.
pub struct ShutdownLatch {
    tx: Option<oneshot::Sender<()>>,
}

impl ShutdownLatch {
    /// Creates a latch and the receiver the daemon waits on
    pub fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Requests shutdown
    ///
    /// # Returns
    ///
    /// `true` only for the call that actually fired the latch
    pub fn trigger(&mut self) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // Receiver may already be gone if the daemon exited
                _ = tx.send(());
                true
            }
            None => false,
        }
    }
}

/// Spawns the task that turns SIGINT/SIGTERM into a shutdown request
///
/// Signals keep being drained after the first one so repeated interrupts
/// never queue up or block delivery.
pub fn spawn_shutdown_listener() -> Result<oneshot::Receiver<()>> {
    let mut sigint = signal(SignalKind::interrupt()).context("SIGINT handler failed")?;
    let mut sigterm = signal(SignalKind::terminate()).context("SIGTERM handler failed")?;
    let (mut latch, rx) = ShutdownLatch::channel();

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                s = sigint.recv() => s.map(|()| "SIGINT"),
                s = sigterm.recv() => s.map(|()| "SIGTERM"),
            };
            let Some(name) = received else {
                break;
            };
            if latch.trigger() {
                info!("{} received: shutting down", name);
            } else {
                debug!("{} received: shutdown already requested", name);
            }
        }
    });

    Ok(rx)
}

//==============================================================================
// Daemon
//==============================================================================

/// Runs reconciliation cycles until done
///
/// With a zero interval exactly one cycle runs. Otherwise a cycle runs
/// immediately and then on every timer tick, until shutdown is requested.
/// Any cycle error ends the run.
pub struct Daemon {
    interval: Duration,
    reconciler: Reconciler,
}

impl Daemon {
    pub fn new(interval: Duration, reconciler: Reconciler) -> Self {
        Self {
            interval,
            reconciler,
        }
    }

    /// Runs the daemon main loop
    ///
    /// `shutdown` is only observed between cycles; a cycle in flight always
    /// completes. A closed channel counts as a shutdown request.
    ///
    /// # Returns
    ///
    /// `Ok(())` after single-shot mode or a graceful shutdown, or the first
    /// cycle error.
    pub async fn run(&self, mut shutdown: oneshot::Receiver<()>) -> Result<(), SyncError> {
        if self.interval.is_zero() {
            debug!("Single-shot mode");
            return self.run_cycle().await;
        }

        info!("Checking for IP changes every {:?}", self.interval);
        self.run_cycle().await?;

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await?;
                }
            }
        }

        info!("Daemon stopped");
        Ok(())
    }

    async fn run_cycle(&self) -> Result<(), SyncError> {
        match self.reconciler.reconcile().await {
            Ok(SyncOutcome::Updated(ip)) => debug!("Cycle finished: updated to {}", ip),
            Ok(SyncOutcome::UpToDate(ip)) => debug!("Cycle finished: {} unchanged", ip),
            Ok(SyncOutcome::Recorded(ip)) => debug!("Cycle finished: recorded {}", ip),
            Ok(SyncOutcome::NoPublicAddress) => warn!("Cycle finished without a public IP"),
            Err(e) => {
                error!("Sync failed: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }
}

//==============================================================================
// Tests
//==============================================================================
