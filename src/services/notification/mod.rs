//! Notification surfaces for engine feedback.
//!
//! Toasts are non-blocking messages that expire after a few seconds. The log and
//! desktop notifiers forward the same messages elsewhere.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use notify_rust::{Notification, Timeout};

use crate::services::collaborators::{NotifyLevel, Notifier};

impl NotifyLevel {
    /// Get the icon for this level
    pub fn icon(&self) -> &'static str {
        match self {
            NotifyLevel::Success => "✓",
            NotifyLevel::Info => "ℹ",
            NotifyLevel::Warning => "⚠",
            NotifyLevel::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: NotifyLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: NotifyLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    /// Set custom duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// In-memory toast queue the host drains when rendering.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: RefCell<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }

    /// Remove expired toasts
    pub fn cleanup(&self) {
        self.toasts.borrow_mut().retain(|t| !t.is_expired());
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.borrow().is_empty()
    }

    /// Current toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    /// `(level, message)` pairs, oldest first
    pub fn messages(&self) -> Vec<(NotifyLevel, String)> {
        self.toasts
            .borrow()
            .iter()
            .map(|t| (t.level, t.message.clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.toasts.borrow_mut().clear();
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.add(Toast::new(message, level));
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Success | NotifyLevel::Info => log::info!("{} {}", level.icon(), message),
            NotifyLevel::Warning => log::warn!("{} {}", level.icon(), message),
            NotifyLevel::Error => log::error!("{} {}", level.icon(), message),
        }
    }
}

/// System notifications through the desktop notification daemon.
pub struct DesktopNotifier {
    summary: String,
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        if !self.enabled {
            return;
        }

        let timeout = match level {
            NotifyLevel::Error => Timeout::Milliseconds(10000),
            _ => Timeout::Milliseconds(5000),
        };

        if let Err(e) = Notification::new()
            .summary(&self.summary)
            .body(&format!("{} {}", level.icon(), message))
            .timeout(timeout)
            .show()
        {
            log::warn!("Failed to show notification: {}", e);
        }
    }
}
