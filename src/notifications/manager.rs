// SPDX-License-Identifier: MPL-2.0
//! The controller's notice log.
//!
//! Notices are kept newest first. Nothing is hidden behind a display limit:
//! the most recent notice is always [`Manager::latest`]. The log is bounded by
//! [`HISTORY_LIMIT`]; when it overflows the oldest notice is dropped.

use std::collections::VecDeque;
use std::time::Instant;

use super::notification::{Notification, NotificationId, Severity};
use crate::domain::workflow::Stage;

/// Most notices retained at once.
pub const HISTORY_LIMIT: usize = 16;

/// Ordered log of workflow notices, newest first.
#[derive(Debug, Default)]
pub struct Manager {
    notices: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a notice as the newest entry and returns its id.
    pub fn push(&mut self, notification: Notification) -> NotificationId {
        let stage = notification.stage();
        match notification.severity() {
            Severity::Error => tracing::error!(?stage, "{}", notification.message()),
            Severity::Warning => tracing::warn!(?stage, "{}", notification.message()),
            Severity::Success | Severity::Info => {
                tracing::info!(?stage, "{}", notification.message());
            }
        }

        let id = notification.id();
        self.notices.push_front(notification);
        if self.notices.len() > HISTORY_LIMIT {
            if let Some(dropped) = self.notices.pop_back() {
                tracing::trace!(id = ?dropped.id(), "notice log full, dropping oldest");
            }
        }
        id
    }

    /// The most recently pushed notice still in the log.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.notices.front()
    }

    /// Notices, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notices.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Removes a notice. Returns `false` if it was not in the log.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id() != id);
        self.notices.len() < before
    }

    /// Drops every notice whose lifetime has run out at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|n| !n.is_expired_at(now));
    }

    /// [`expire`](Self::expire) against the current time.
    pub fn tick(&mut self) {
        self.expire(Instant::now());
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    /// Drops the error notices raised by `stage`, once it has succeeded.
    pub fn clear_stage_errors(&mut self, stage: Stage) {
        self.notices
            .retain(|n| !(n.severity() == Severity::Error && n.stage() == Some(stage)));
    }
}
