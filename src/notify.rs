//! User-facing toast notifications
//!
//! Stores emit toasts as data; whoever renders them drains or inspects the
//! active queue. Every toast is also logged.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{info, warn};

pub const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Error, message));
    }
}

/// Queue of toasts that expire after a fixed timeout
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Toast>>,
    timeout: Duration,
}

impl ToastQueue {
    pub fn new(timeout: Duration) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::new()),
            timeout,
        }
    }

    /// Toasts that have not yet timed out, oldest first
    pub fn active(&self) -> Vec<Toast> {
        let Ok(mut toasts) = self.toasts.lock() else {
            return Vec::new();
        };
        self.prune(&mut toasts);
        toasts.iter().cloned().collect()
    }

    fn prune(&self, toasts: &mut VecDeque<Toast>) {
        let now = Instant::now();
        while let Some(front) = toasts.front() {
            if now.duration_since(front.created_at) > self.timeout {
                toasts.pop_front();
            } else {
                break;
            }
        }
    }

    /// Remove and return every queued toast regardless of age
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().ok()?.back().cloned()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TIMEOUT)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => info!("✅ {}", toast.message),
            ToastLevel::Error => warn!("❌ {}", toast.message),
        }
        if let Ok(mut toasts) = self.toasts.lock() {
            self.prune(&mut toasts);
            toasts.push_back(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_timeout() {
        let queue = ToastQueue::new(Duration::from_millis(0));
        queue.notify(Toast {
            level: ToastLevel::Error,
            message: "old".to_string(),
            created_at: Instant::now() - Duration::from_millis(50),
        });

        assert!(queue.active().is_empty());
        assert!(queue.last().is_none());
    }

    #[test]
    fn test_notify_drops_expired_toasts() {
        let queue = ToastQueue::new(Duration::from_millis(1000));
        for _ in 0..3 {
            queue.notify(Toast {
                level: ToastLevel::Success,
                message: "stale".to_string(),
                created_at: Instant::now() - Duration::from_secs(5),
            });
        }
        queue.error("fresh");

        let toasts = queue.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "fresh");
    }

    #[test]
    fn test_drain_returns_in_order() {
        let queue = ToastQueue::default();
        queue.success("first");
        queue.error("second");

        let toasts = queue.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[1].message, "second");
        assert!(queue.drain().is_empty());
    }
}
