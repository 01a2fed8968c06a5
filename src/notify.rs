//! Single-slot outcome notifications.
//!
//! Posting replaces whatever is currently shown, so at most one notification is ever visible.
//! Observers watch the slot through a [`watch::Receiver`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
        }
    }
}

/// Notification currently in the slot, tagged with the id it was posted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posted {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<watch::Sender<Option<Posted>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot: Arc::new(slot), next_id: Arc::new(AtomicU64::new(1)) }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Posted>> {
        self.slot.subscribe()
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().as_ref().map(|p| p.notification.clone())
    }

    pub fn post(&self, notification: Notification) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, kind = ?notification.kind, message = %notification.message, "Posting notification");
        self.slot.send_replace(Some(Posted { id, notification }));
        id
    }

    /// Posts and schedules removal after `timeout`, unless it has been replaced by then.
    /// Must be called from within a tokio runtime when `timeout` is set.
    pub fn post_with_timeout(&self, notification: Notification, timeout: Option<Duration>) -> u64 {
        let id = self.post(notification);
        if let Some(timeout) = timeout {
            let notifier = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                notifier.dismiss_id(id);
            });
        }
        id
    }

    pub fn dismiss(&self) {
        self.slot.send_replace(None);
    }

    /// Clears the slot only if notification `id` is still the one shown.
    pub fn dismiss_id(&self, id: u64) -> bool {
        self.slot.send_if_modified(|slot| {
            if slot.as_ref().is_some_and(|posted| posted.id == id) {
                *slot = None;
                true
            } else {
                false
            }
        })
    }
}
