//! Transient notifications raised by the order workflow.
//!
//! Notifications are kept in arrival order and expire a fixed time after they
//! were raised. Front ends call [`Notifications::prune`] on their tick and
//! render whatever remains.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use yousmala_types::Severity;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Upper bound on simultaneously retained notifications.
const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    entries: VecDeque<Notification>,
}

impl Notifications {
    /// Raise a notification stamped with the current instant.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.push_at(severity, message, Instant::now());
    }

    /// Raise a notification stamped with `now`.
    pub fn push_at(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        if self.entries.len() == MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            severity,
            message: message.into(),
            created_at: now,
        });
    }

    /// Drop every notification expired at `now`. Returns `true` when anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.entries.len();
        self.entries.retain(|notification| !notification.is_expired_at(now));
        before != self.entries.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
