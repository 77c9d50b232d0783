//! Success and error banners.
//!
//! At most one notification is visible. Showing a success replaces any error
//! and the other way round. A success carries its own deadline and disappears
//! once it passes; an error stays until it is dismissed or replaced. Because
//! the deadline belongs to the notification itself, an old success can never
//! clear a newer message.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Kind of banner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Green banner, dismisses itself
    Success,
    /// Red banner, stays until dismissed
    Error,
}

/// A visible banner.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notification {
    /// Success or error
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
    #[serde(skip)]
    expires_at: Option<Instant>,
}

impl Notification {
    /// Whether this is a success banner.
    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }

    /// Whether this is an error banner.
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Holds the single notification slot.
#[derive(Debug)]
pub struct NotificationCenter {
    slot: Option<Notification>,
    success_display: Duration,
}

impl NotificationCenter {
    /// Creates an empty center whose successes last `success_display`.
    pub fn new(success_display: Duration) -> Self {
        Self {
            slot: None,
            success_display,
        }
    }

    /// The visible notification, if any.
    pub fn current(&self) -> Option<&Notification> {
        let now = Instant::now();
        self.slot.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Show a success message, replacing whatever was visible.
    pub fn show_success(&mut self, message: impl Into<String>) {
        self.slot = Some(Notification {
            kind: NotificationKind::Success,
            message: message.into(),
            expires_at: Some(Instant::now() + self.success_display),
        });
    }

    /// Show an error message, replacing whatever was visible.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.slot = Some(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
            expires_at: None,
        });
    }

    /// Dismiss the success banner, if one is visible. Errors are left alone.
    pub fn dismiss_success(&mut self) {
        if self.slot.as_ref().is_some_and(Notification::is_success) {
            self.slot = None;
        }
    }

    /// Dismiss the error banner, if one is visible. Successes are left alone.
    pub fn dismiss_error(&mut self) {
        if self.slot.as_ref().is_some_and(Notification::is_error) {
            self.slot = None;
        }
    }

    /// Dismiss whatever is visible.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}
