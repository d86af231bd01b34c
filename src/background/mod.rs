//! Background services: warm-up, availability polling and notices.
//!
//! These run on their own tasks, never touch `SessionState`, and expose their
//! results only through handles and snapshots.
//!
//! # Modules
//!
//! - [`warmup`]: One-shot wake-up of a sleeping backend
//! - [`availability`]: Periodic liveness polling
//! - [`notifications`]: Session notices with auto-dismiss timers

pub mod availability;
pub mod notifications;
pub mod warmup;

pub use availability::{AvailabilityPoller, AvailabilityStatus};
pub use notifications::{Notification, NotificationScheduler, DEFAULT_NOTICES};
pub use warmup::{WarmupHandle, WarmupMonitor, WarmupOutcome};

use crate::api::Transport;
use crate::Config;
use std::sync::Arc;

/// Every background service of one session, started together and shut down
/// together.
#[derive(Debug)]
pub struct BackgroundServices {
    warmup: Option<WarmupHandle>,
    poller: Option<AvailabilityPoller>,
    notices: NotificationScheduler,
}

impl BackgroundServices {
    /// Starts the services enabled in `config`. Must be called from within a
    /// tokio runtime.
    ///
    /// Each call starts at most one warm-up, owned by the returned value. A
    /// session is one `BackgroundServices`; calling `start` again begins a new
    /// session with its own warm-up, so callers keep exactly one per session.
    #[must_use]
    pub fn start(config: &Config, transport: &Arc<dyn Transport>) -> Self {
        let warmup = config.warmup.then(|| {
            WarmupMonitor::new(
                &config.base_url,
                config.warmup_retry_delay(),
                Arc::clone(transport),
            )
            .spawn()
        });

        let poller = config.poll_availability.then(|| {
            AvailabilityPoller::start(&config.base_url, config.poll_interval(), Arc::clone(transport))
        });

        let notices =
            NotificationScheduler::from_messages(&config.notifications, config.notification_duration());

        tracing::debug!(
            warmup = warmup.is_some(),
            polling = poller.is_some(),
            notices = config.notifications.len(),
            "background services started"
        );

        Self {
            warmup,
            poller,
            notices,
        }
    }

    /// Latest availability, or `Checking` when polling is disabled.
    #[must_use]
    pub fn availability(&self) -> AvailabilityStatus {
        self.poller
            .as_ref()
            .map_or(AvailabilityStatus::Checking, AvailabilityPoller::status)
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notices.snapshot()
    }

    pub fn dismiss(&mut self, index: usize) -> bool {
        self.notices.dismiss(index)
    }

    /// Cancels the warm-up, stops polling and cancels all notice timers.
    pub fn shutdown(&mut self) {
        if let Some(mut warmup) = self.warmup.take() {
            warmup.cancel();
        }
        if let Some(poller) = self.poller.as_mut() {
            poller.stop();
        }
        self.notices.shutdown();
        tracing::debug!("background services shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpResponse, TransportError};
    use crate::domain::RequestDescriptor;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct AlwaysUp;

    #[async_trait]
    impl Transport for AlwaysUp {
        async fn execute(&self, _: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
            Err(TransportError("not used".to_string()))
        }

        async fn probe(&self, _: &str) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_services_are_not_started() {
        let config = Config {
            warmup: false,
            poll_availability: false,
            notifications: vec!["only".to_string()],
            ..Config::default()
        };
        let transport: Arc<dyn Transport> = Arc::new(AlwaysUp);
        let mut services = BackgroundServices::start(&config, &transport);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(services.availability(), AvailabilityStatus::Checking);
        assert_eq!(services.notifications().len(), 1);
        assert!(services.dismiss(0));
        services.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_freezes_availability() {
        let transport: Arc<dyn Transport> = Arc::new(AlwaysUp);
        let mut services = BackgroundServices::start(&Config::default(), &transport);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(services.availability(), AvailabilityStatus::Online);

        services.shutdown();
        assert_eq!(services.availability(), AvailabilityStatus::Online);
        assert_eq!(services.notifications().len(), DEFAULT_NOTICES.len());
    }

    /// Counts root probes and reports the backend as down.
    #[derive(Default)]
    struct CountingDown {
        probes: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingDown {
        async fn execute(&self, _: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
            Err(TransportError("not used".to_string()))
        }

        async fn probe(&self, _: &str) -> Result<(), TransportError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            Err(TransportError("connection refused".to_string()))
        }

        async fn wake(&self, _: &str) {}
    }

    #[tokio::test(start_paused = true)]
    async fn one_session_runs_a_single_warmup() {
        let config = Config {
            poll_availability: false,
            ..Config::default()
        };
        let counter = Arc::new(CountingDown::default());
        let transport: Arc<dyn Transport> = counter.clone();
        let mut services = BackgroundServices::start(&config, &transport);

        tokio::time::sleep(config.warmup_retry_delay() * 10).await;

        // The first probe and its single follow-up; nothing afterwards.
        assert_eq!(counter.probes.load(Ordering::SeqCst), 2);
        services.shutdown();
        assert_eq!(counter.probes.load(Ordering::SeqCst), 2);
    }
}
