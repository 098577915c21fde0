use log::{error, info};
use std::sync::Mutex;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A transient message shown to the user (a toast in the browser shell)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: Level,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: Level::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: Level::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log and nowhere else
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Info => info!("{}: {}", notification.title, notification.description),
            Level::Error => error!("{}: {}", notification.title, notification.description),
        }
    }
}

/// Keeps every notification until drained
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn error_count(&self) -> usize {
        self.lock().iter().filter(|n| n.is_error()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
