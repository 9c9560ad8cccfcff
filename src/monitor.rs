// ABOUTME: Connectivity monitor — probes the health endpoint at startup and on a fixed interval.
// ABOUTME: Publishes a connected flag through a watch channel; readers never mutate it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval, timeout};

use crate::client::ChatApi;

/// Read-only view of the connected flag. Cloned into the sequencer, the
/// transport and the UI; only `ConnectivityMonitor` writes it.
#[derive(Debug, Clone)]
pub struct Connectivity {
    rx: watch::Receiver<bool>,
}

impl Connectivity {
    /// Create the flag with its writer half. The monitor owns the writer.
    pub fn channel(initial: bool) -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    pub fn is_connected(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the next change. Returns `None` once the monitor is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Periodic health prober. Failures only flip the flag; there is no backoff.
pub struct ConnectivityMonitor {
    api: Arc<dyn ChatApi>,
    every: Duration,
    state: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    /// Build a monitor starting in the disconnected state.
    pub fn new(api: Arc<dyn ChatApi>, every: Duration) -> (Self, Connectivity) {
        let (state, connectivity) = Connectivity::channel(false);
        (Self { api, every, state }, connectivity)
    }

    /// Probe once and publish the result. A probe that outlives the interval
    /// counts as a failure.
    pub async fn probe(&self) -> bool {
        let connected = match timeout(self.every, self.api.health()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "health probe failed");
                false
            }
            Err(_) => {
                tracing::warn!(after_secs = self.every.as_secs(), "health probe timed out");
                false
            }
        };
        tracing::debug!(connected, "health probe finished");

        self.state.send_if_modified(|current| {
            if *current == connected {
                return false;
            }
            tracing::info!(connected, "connectivity changed");
            *current = connected;
            true
        });
        connected
    }

    /// Probe immediately, then once per interval, until every reader is dropped.
    pub async fn run(self) {
        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if self.state.is_closed() {
                break;
            }
            self.probe().await;
        }
    }
}
