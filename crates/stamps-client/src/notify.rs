//! User visible notifications.

use std::time::Duration;

use tracing::{error, info};

/// How long a notification stays up unless stated otherwise
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub duration: Duration,
}

impl Notification {
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self::new(Status::Success, title, Some(description.into()))
    }

    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self::new(Status::Error, title, Some(description.into()))
    }

    pub fn info(title: &str) -> Self {
        Self::new(Status::Info, title, None)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    fn new(status: Status, title: &str, description: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            description,
            status,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Delivers notifications to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log; errors at ERROR level, everything else at INFO.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let text = match &notification.description {
            Some(description) => format!("{}: {}", notification.title, description),
            None => notification.title.clone(),
        };

        match notification.status {
            Status::Error => error!("{text}"),
            Status::Success | Status::Info => info!("{text}"),
        }
    }
}
