//! Transient user-facing notifications with automatic dismissal.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

/// The single notification slot.
///
/// Each show replaces the previous message and its deadline, so an earlier
/// timer can never hide a later message. Expiry is driven by the event
/// loop's tick comparing against the current deadline, which also makes
/// hiding an already-hidden toast a no-op.
#[derive(Debug, Default)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    deadline: Option<Instant>,
}

impl Toast {
    pub fn info(&mut self, message: impl Into<String>) {
        self.show_at(message.into(), ToastKind::Info, Instant::now());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(message.into(), ToastKind::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(message.into(), ToastKind::Error, Instant::now());
    }

    fn show_at(&mut self, message: String, kind: ToastKind, shown_at: Instant) {
        self.message = message;
        self.kind = kind;
        self.deadline = Some(shown_at + TOAST_DURATION);
    }

    /// Hides the message once `now` passes the current deadline.
    pub fn tick(&mut self, now: Instant) {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.deadline = None;
        }
    }

    /// The visible message and its kind, if one is showing.
    #[must_use]
    pub fn visible(&self) -> Option<(&str, ToastKind)> {
        self.deadline.map(|_| (self.message.as_str(), self.kind))
    }
}
