//! User-facing notifications.
//!
//! The stores confirm mutations (and report failures) through a `Notifier`
//! the caller injects, the way the web version raised toasts. The crate
//! ships a tracing-backed notifier for headless use and a buffering one for
//! tests.

use std::sync::Mutex;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Rendered destructively (red toast) by UI consumers.
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// Presentation seam: the stores emit, consumers decide how to show.
pub trait Notifier: Send {
    fn notify(&self, notification: Notification);
}

/// Lets callers keep a handle on the notifier they hand to a store.
impl<T: Notifier + Sync> Notifier for std::sync::Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Logs notifications through `tracing` instead of a UI.
#[derive(Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                tracing::info!(title = %notification.title, "{}", notification.body)
            }
            Severity::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.body)
            }
        }
    }
}

/// Buffers notifications so tests can assert on what the user would see.
#[derive(Default)]
pub struct MemoryNotifier {
    buffer: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.buffer
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.buffer
            .lock()
            .ok()
            .and_then(|buf| buf.last().cloned())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(notification);
        }
    }
}
