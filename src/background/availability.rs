//! Periodic backend availability polling.
//!
//! [`AvailabilityPoller`] probes `GET {base}/` once immediately and then once
//! per interval until stopped, publishing the latest [`AvailabilityStatus`] on
//! a `watch` channel. Each tick's probe runs on its own task so a slow probe
//! never delays the next tick. Every probe carries its tick number and only a
//! result newer than the last applied one is written, so a slow probe cannot
//! overwrite a later tick's outcome. A shared cancellation flag is checked
//! before every write; probes that resolve after [`AvailabilityPoller::stop`]
//! are discarded.

use crate::api::classifier::endpoint;
use crate::api::Transport;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Last known reachability of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    /// No probe has completed yet.
    #[default]
    Checking,
    Online,
    Offline,
}

impl AvailabilityStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle to a running availability poller. Dropping it stops polling.
#[derive(Debug)]
pub struct AvailabilityPoller {
    publisher: Arc<watch::Sender<AvailabilityStatus>>,
    status: watch::Receiver<AvailabilityStatus>,
    stopped: Arc<AtomicBool>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AvailabilityPoller {
    /// Starts polling `{base_url}/` every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(base_url: &str, interval: Duration, transport: Arc<dyn Transport>) -> Self {
        let (publisher, status) = watch::channel(AvailabilityStatus::Checking);
        let publisher = Arc::new(publisher);
        let stopped = Arc::new(AtomicBool::new(false));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let url = endpoint(base_url, "/");
        let task = {
            let publisher = Arc::clone(&publisher);
            let stopped = Arc::clone(&stopped);
            let last_applied = Arc::new(AtomicU64::new(0));
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                let mut tick: u64 = 0;
                loop {
                    tokio::select! {
                        _ = &mut stop_rx => break,
                        _ = ticker.tick() => {
                            tick += 1;
                            tokio::spawn(probe_once(
                                Arc::clone(&transport),
                                url.clone(),
                                Probe {
                                    tick,
                                    publisher: Arc::clone(&publisher),
                                    stopped: Arc::clone(&stopped),
                                    last_applied: Arc::clone(&last_applied),
                                },
                            ));
                        }
                    }
                }
                tracing::debug!("availability poller stopped");
            })
        };

        tracing::debug!(?interval, "availability poller started");

        Self {
            publisher,
            status,
            stopped,
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }

    /// Latest published status.
    #[must_use]
    pub fn status(&self) -> AvailabilityStatus {
        *self.status.borrow()
    }

    /// Subscribes to status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AvailabilityStatus> {
        self.status.clone()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Stops polling. The last published status is kept; in-flight probes
    /// finish but their results are discarded. Idempotent.
    pub fn stop(&mut self) {
        // Raised under the channel lock so no probe can be mid-write.
        self.publisher.send_if_modified(|_| {
            self.stopped.store(true, Ordering::SeqCst);
            false
        });
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for AvailabilityPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Where a probe publishes its result, and the tick it belongs to.
struct Probe {
    tick: u64,
    publisher: Arc<watch::Sender<AvailabilityStatus>>,
    stopped: Arc<AtomicBool>,
    /// Highest tick whose result has been applied. Ticks start at 1.
    last_applied: Arc<AtomicU64>,
}

async fn probe_once(transport: Arc<dyn Transport>, url: String, probe: Probe) {
    let Probe {
        tick,
        publisher,
        stopped,
        last_applied,
    } = probe;
    let span = tracing::debug_span!("availability_probe", url = %url, tick);
    let observed = async {
        match transport.probe(&url).await {
            Ok(()) => AvailabilityStatus::Online,
            Err(e) => {
                tracing::debug!(error = %e, "backend unreachable");
                AvailabilityStatus::Offline
            }
        }
    }
    .instrument(span)
    .await;

    publisher.send_if_modified(|current| {
        if stopped.load(Ordering::SeqCst) {
            tracing::trace!(status = %observed, "discarding probe result after stop");
            return false;
        }
        // Only touched under the channel lock, so a plain load/store suffices.
        if last_applied.load(Ordering::SeqCst) >= tick {
            tracing::trace!(tick, status = %observed, "discarding result superseded by a newer tick");
            return false;
        }
        last_applied.store(tick, Ordering::SeqCst);
        if *current == observed {
            return false;
        }
        tracing::debug!(from = %current, to = %observed, "availability changed");
        *current = observed;
        true
    });
}
