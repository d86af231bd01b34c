//! Session notices with individual auto-dismiss timers.
//!
//! The notice set is fixed when the scheduler starts. Each notice is visible
//! on creation and is hidden when its own timer elapses or when the user
//! dismisses it, whichever comes first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Notices shown when no list is configured.
pub const DEFAULT_NOTICES: &[&str] = &[
    "Explanations are simplified for learning and are not legal advice.",
    "The analysis server sleeps when idle; the first request can take up to a minute.",
];

/// One session notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration_ms: u64,
    pub dismissed: bool,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            duration_ms,
            dismissed: false,
        }
    }
}

/// Owns the notice set and one auto-dismiss timer per notice.
#[derive(Debug)]
pub struct NotificationScheduler {
    notices: Arc<Mutex<Vec<Notification>>>,
    timers: Vec<Option<JoinHandle<()>>>,
}

impl NotificationScheduler {
    /// Starts a timer for every notice. Must be called from within a tokio
    /// runtime.
    #[must_use]
    pub fn start(notices: Vec<Notification>) -> Self {
        let timers = notices
            .iter()
            .map(|notice| Duration::from_millis(notice.duration_ms))
            .collect::<Vec<_>>();
        let notices = Arc::new(Mutex::new(notices));

        let timers = timers
            .into_iter()
            .enumerate()
            .map(|(index, after)| {
                let notices = Arc::clone(&notices);
                Some(tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(notice) = lock(&notices).get_mut(index) {
                        notice.dismissed = true;
                    }
                    tracing::debug!(index, "notice expired");
                }))
            })
            .collect();

        Self { notices, timers }
    }

    /// Builds the notice set from plain messages sharing one display duration.
    #[must_use]
    pub fn from_messages<S: AsRef<str>>(messages: &[S], duration: Duration) -> Self {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self::start(
            messages
                .iter()
                .map(|m| Notification::new(m.as_ref(), duration_ms))
                .collect(),
        )
    }

    /// Hides notice `index` and cancels only its timer.
    ///
    /// Returns `false` if there is no such notice or it was already hidden.
    pub fn dismiss(&mut self, index: usize) -> bool {
        if let Some(timer) = self.timers.get_mut(index).and_then(Option::take) {
            timer.abort();
        }
        match lock(&self.notices).get_mut(index) {
            Some(notice) if !notice.dismissed => {
                notice.dismissed = true;
                tracing::debug!(index, "notice dismissed");
                true
            }
            _ => false,
        }
    }

    /// Current notice set, dismissed entries included.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        lock(&self.notices).clone()
    }

    /// Number of notices still visible.
    #[must_use]
    pub fn visible(&self) -> usize {
        lock(&self.notices).iter().filter(|n| !n.dismissed).count()
    }

    /// Cancels every pending timer. Visibility is left as it is.
    pub fn shutdown(&mut self) {
        for timer in self.timers.iter_mut().filter_map(Option::take) {
            timer.abort();
        }
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// A timer that panicked mid-write leaves a plain flag behind; keep going.
fn lock(notices: &Mutex<Vec<Notification>>) -> MutexGuard<'_, Vec<Notification>> {
    notices.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_messages(scheduler: &NotificationScheduler) -> Vec<String> {
        scheduler
            .snapshot()
            .into_iter()
            .filter(|n| !n.dismissed)
            .map(|n| n.message)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn notices_expire_on_their_own_timers() {
        let scheduler = NotificationScheduler::start(vec![
            Notification::new("short", 1_000),
            Notification::new("long", 5_000),
        ]);
        assert_eq!(scheduler.visible(), 2);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(visible_messages(&scheduler), vec!["long"]);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(scheduler.visible(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_one_leaves_the_others_untouched() {
        let mut scheduler = NotificationScheduler::from_messages(
            &["a", "b", "c"],
            Duration::from_secs(120),
        );

        assert!(scheduler.dismiss(1));
        assert!(!scheduler.dismiss(1));
        assert!(!scheduler.dismiss(7));
        assert_eq!(visible_messages(&scheduler), vec!["a", "c"]);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(visible_messages(&scheduler), vec!["a", "c"]);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(scheduler.visible(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timers() {
        let mut scheduler = NotificationScheduler::from_messages(&["a"], Duration::from_secs(2));
        scheduler.shutdown();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(scheduler.visible(), 1);
    }

    #[test]
    fn default_notices_are_present() {
        assert_eq!(DEFAULT_NOTICES.len(), 2);
        assert!(DEFAULT_NOTICES.iter().all(|m| !m.is_empty()));
    }
}
