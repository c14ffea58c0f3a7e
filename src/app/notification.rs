// ABOUTME: Notification center for displaying temporary status messages to users
// Keeps a bounded number of notifications on screen and expires each one after a fixed delay

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Maximum number of notifications visible at the same time.
pub const DEFAULT_CAPACITY: usize = 3;

pub const DEFAULT_LIFETIME_MS: u64 = 5000;

/// How long a notification stays on screen unless evicted earlier.
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(DEFAULT_LIFETIME_MS);

/// Tone of a notification.
///
/// `success` and `danger` are the recognized values. Any other string is kept
/// as-is and rendered with a neutral style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Severity(String);

impl Severity {
    pub const SUCCESS: &'static str = "success";
    pub const DANGER: &'static str = "danger";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn success() -> Self {
        Self::new(Self::SUCCESS)
    }

    pub fn danger() -> Self {
        Self::new(Self::DANGER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS
    }

    pub fn is_danger(&self) -> bool {
        self.0 == Self::DANGER
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: impl Into<Severity>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity: severity.into(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::success())
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, Severity::danger())
    }
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    expiry: Option<AbortHandle>,
}

#[derive(Debug)]
struct Inner {
    queue: VecDeque<Entry>,
    capacity: usize,
    lifetime: Duration,
}

impl Inner {
    /// Check-and-clear removal. Returns `None` when the notification is already gone.
    fn remove(&mut self, id: Uuid) -> Option<Entry> {
        let index = self.queue.iter().position(|e| e.notification.id == id)?;
        self.queue.remove(index)
    }
}

/// Owns every live notification for one UI session.
///
/// Cloning yields another handle to the same queue. A notification leaves the
/// queue either when its expiry task fires or when a newer notification pushes
/// it past capacity; whichever path comes second finds nothing to remove.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Inner>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CAPACITY, DEFAULT_LIFETIME)
    }

    /// A capacity of zero is raised to one.
    pub fn with_limits(capacity: usize, lifetime: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queue: VecDeque::new(),
                capacity: capacity.max(1),
                lifetime,
            })),
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: impl Into<Severity>) -> Uuid {
        let notification = Notification::new(message, severity);
        let id = notification.id;
        debug!("Notify [{}] {}", notification.severity, notification.message);

        let mut inner = self.lock();
        let deadline = notification.created_at + inner.lifetime;
        let expiry = self.spawn_expiry(id, deadline);
        inner.queue.push_back(Entry { notification, expiry });

        while inner.queue.len() > inner.capacity {
            if let Some(oldest) = inner.queue.pop_front() {
                debug!("Evicting notification {}", oldest.notification.id);
                if let Some(handle) = oldest.expiry {
                    handle.abort();
                }
            }
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::success())
    }

    pub fn danger(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::danger())
    }

    /// Removes the notification and cancels its expiry task.
    ///
    /// Returns `false` if it was already dismissed.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = self.lock().remove(id);
        match removed {
            Some(entry) => {
                if let Some(handle) = entry.expiry {
                    handle.abort();
                }
                true
            }
            None => false,
        }
    }

    pub fn dismiss_oldest(&self) -> Option<Notification> {
        let oldest = self.lock().queue.pop_front()?;
        if let Some(handle) = oldest.expiry {
            handle.abort();
        }
        Some(oldest.notification)
    }

    /// Snapshot of the visible notifications, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.lock()
            .queue
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    pub fn lifetime(&self) -> Duration {
        self.lock().lifetime
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The deadline is fixed by the caller so a late first poll does not extend it.
    fn spawn_expiry(&self, id: Uuid, deadline: Instant) -> Option<AbortHandle> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; notification {} will only leave by eviction", id);
            return None;
        };

        let inner: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let removed = inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(id);
            if removed.is_some() {
                debug!("Notification {} expired", id);
            }
        });

        Some(task.abort_handle())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn messages(center: &NotificationCenter) -> Vec<String> {
        center.visible().into_iter().map(|n| n.message).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_count_never_exceeds_capacity() {
        let center = NotificationCenter::new();

        for i in 0..10 {
            center.success(format!("message {}", i));
            assert!(center.len() <= 3);
        }

        assert_eq!(center.len(), 3);
        assert_eq!(messages(&center), vec!["message 7", "message 8", "message 9"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fourth_notification_evicts_exactly_the_oldest() {
        let center = NotificationCenter::new();
        let first = center.success("first");
        let second = center.danger("second");
        let third = center.success("third");

        let fourth = center.danger("fourth");

        let ids: Vec<Uuid> = center.visible().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second, third, fourth]);
        assert!(!ids.contains(&first));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_lifetime() {
        let center = NotificationCenter::new();
        center.success("Blockchain fetched successfully!");

        sleep(Duration::from_millis(4999)).await;
        settle().await;
        assert_eq!(center.len(), 1, "must not expire before 5000 ms");

        sleep(Duration::from_millis(2)).await;
        settle().await;
        assert!(center.is_empty(), "must expire at 5000 ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_measured_from_creation() {
        let center = NotificationCenter::with_limits(3, Duration::from_millis(500));
        let id = center.success("created while the loop was busy");
        let created_at = center.visible()[0].created_at;

        // Clock moves on before the expiry task is first polled
        tokio::time::advance(Duration::from_millis(300)).await;

        sleep(Duration::from_millis(199)).await;
        settle().await;
        assert_eq!(center.len(), 1);

        sleep(Duration::from_millis(2)).await;
        settle().await;
        assert!(Instant::now() >= created_at + Duration::from_millis(500));
        assert!(center.is_empty(), "must expire 500 ms after creation");
        assert!(!center.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_after_expiry_drops_oldest_live_entry() {
        let center = NotificationCenter::new();
        center.success("a");

        sleep(Duration::from_millis(1000)).await;
        let b = center.success("b");
        let c = center.danger("c");

        // "a" expires at 5000 while "b" and "c" live until 6000
        sleep(Duration::from_millis(4001)).await;
        settle().await;
        assert_eq!(messages(&center), vec!["b", "c"]);

        let d = center.success("d");
        assert_eq!(center.len(), 3);
        let ids: Vec<Uuid> = center.visible().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![b, c, d]);

        let e = center.success("e");
        let ids: Vec<Uuid> = center.visible().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c, d, e]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_of_evicted_notification_is_noop() {
        let center = NotificationCenter::new();
        center.success("a");
        center.success("b");
        center.success("c");

        sleep(Duration::from_millis(1000)).await;
        center.success("d");
        assert_eq!(messages(&center), vec!["b", "c", "d"]);

        // "a" would have expired at 5000; "b" and "c" expire then too.
        sleep(Duration::from_millis(4001)).await;
        settle().await;
        assert_eq!(messages(&center), vec!["d"]);

        sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_idempotent() {
        let center = NotificationCenter::new();
        let id = center.danger("Error mining block: boom");

        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));

        sleep(DEFAULT_LIFETIME + Duration::from_millis(10)).await;
        settle().await;
        assert!(center.is_empty());
        assert!(!center.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_after_timer_is_noop() {
        let center = NotificationCenter::new();
        let id = center.success("short lived");

        sleep(DEFAULT_LIFETIME + Duration::from_millis(1)).await;
        settle().await;

        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_oldest() {
        let center = NotificationCenter::new();
        center.success("one");
        center.success("two");

        let dismissed = center.dismiss_oldest().map(|n| n.message);
        assert_eq!(dismissed.as_deref(), Some("one"));
        assert_eq!(messages(&center), vec!["two"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_limits() {
        let center = NotificationCenter::with_limits(0, Duration::from_millis(100));
        assert_eq!(center.capacity(), 1);

        center.success("x");
        center.success("y");
        assert_eq!(messages(&center), vec!["y"]);

        sleep(Duration::from_millis(101)).await;
        settle().await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrecognized_severity_is_accepted() {
        let center = NotificationCenter::new();
        center.notify("heads up", "warning");

        let visible = center.visible();
        assert_eq!(visible[0].severity.as_str(), "warning");
        assert!(!visible[0].severity.is_success());
        assert!(!visible[0].severity.is_danger());
    }

    #[test]
    fn test_notify_without_runtime_still_bounds_queue() {
        let center = NotificationCenter::new();
        for i in 0..5 {
            center.success(format!("{}", i));
        }
        assert_eq!(messages(&center), vec!["2", "3", "4"]);
    }
}
