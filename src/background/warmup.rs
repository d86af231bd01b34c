//! One-shot backend warm-up.
//!
//! Free-tier hosts put the backend to sleep when idle. The monitor probes the
//! base URL once; if nothing answers it fires a side-channel wake request,
//! waits a fixed delay, probes once more and then tears the side channel down.
//! It never retries beyond that and never surfaces a failure.

use crate::api::classifier::endpoint;
use crate::api::Transport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// How a warm-up attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmupOutcome {
    /// The first probe got an answer.
    AlreadyWarm,
    /// The first probe failed, the delayed one succeeded.
    WokeUp,
    /// Both probes failed.
    StillAsleep,
    /// Cancelled before the delayed probe fired.
    Cancelled,
}

/// Warm-up parameters. Consumed by [`WarmupMonitor::spawn`].
pub struct WarmupMonitor {
    url: String,
    retry_delay: Duration,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for WarmupMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarmupMonitor")
            .field("url", &self.url)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}

impl WarmupMonitor {
    #[must_use]
    pub fn new(base_url: &str, retry_delay: Duration, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: endpoint(base_url, "/"),
            retry_delay,
            transport,
        }
    }

    /// Runs the warm-up on its own task.
    #[must_use]
    pub fn spawn(self) -> WarmupHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let span = tracing::debug_span!("warmup", url = %self.url);
        let task = tokio::spawn(self.run(cancel_rx).instrument(span));
        WarmupHandle {
            cancel: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Runs the warm-up to completion. Resolving `cancel` (or dropping its
    /// sender) before the delayed probe fires ends the run with
    /// [`WarmupOutcome::Cancelled`].
    pub async fn run(self, mut cancel: oneshot::Receiver<()>) -> WarmupOutcome {
        let first = tokio::select! {
            biased;
            _ = &mut cancel => return finish(WarmupOutcome::Cancelled),
            result = self.transport.probe(&self.url) => result,
        };

        match first {
            Ok(()) => return finish(WarmupOutcome::AlreadyWarm),
            Err(e) => tracing::debug!(error = %e, "backend asleep, sending wake-up request"),
        }

        let side_channel = SideChannel(tokio::spawn({
            let transport = Arc::clone(&self.transport);
            let url = self.url.clone();
            async move { transport.wake(&url).await }
        }));

        let outcome = tokio::select! {
            biased;
            _ = &mut cancel => WarmupOutcome::Cancelled,
            () = tokio::time::sleep(self.retry_delay) => {
                match self.transport.probe(&self.url).await {
                    Ok(()) => WarmupOutcome::WokeUp,
                    Err(e) => {
                        tracing::debug!(error = %e, "backend still unreachable after wake-up");
                        WarmupOutcome::StillAsleep
                    }
                }
            }
        };

        drop(side_channel);
        finish(outcome)
    }
}

fn finish(outcome: WarmupOutcome) -> WarmupOutcome {
    match outcome {
        WarmupOutcome::AlreadyWarm | WarmupOutcome::WokeUp => {
            tracing::info!(?outcome, "backend warm");
        }
        WarmupOutcome::StillAsleep | WarmupOutcome::Cancelled => {
            tracing::debug!(?outcome, "warm-up finished");
        }
    }
    outcome
}

/// The wake-up request. Aborted when dropped.
struct SideChannel(JoinHandle<()>);

impl Drop for SideChannel {
    fn drop(&mut self) {
        tracing::trace!("tearing down wake-up request");
        self.0.abort();
    }
}

/// Handle to a spawned warm-up. Dropping it cancels the warm-up.
#[derive(Debug)]
pub struct WarmupHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<WarmupOutcome>>,
}

impl WarmupHandle {
    /// Requests cancellation. Has no effect once the delayed probe has fired.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the warm-up to end.
    pub async fn outcome(mut self) -> WarmupOutcome {
        let Some(task) = self.task.take() else {
            return WarmupOutcome::Cancelled;
        };
        task.await.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "warm-up task did not complete");
            WarmupOutcome::Cancelled
        })
    }
}

impl Drop for WarmupHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
