// SPDX-License-Identifier: MPL-2.0
//! A single workflow notice.

use crate::domain::workflow::Stage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a notice for [`Manager::dismiss`](super::Manager::dismiss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// How serious a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A stage completed.
    Success,
    /// Nothing went wrong, but nothing happened either (no geocoding match).
    Info,
    /// The request was refused before anything started.
    Warning,
    /// A collaborator failed.
    Error,
}

impl Severity {
    /// How long a notice of this severity stays in the log.
    ///
    /// Errors have no lifetime and stay until dismissed or cleared.
    #[must_use]
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// One outcome the caller should surface to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    stage: Option<Stage>,
    raised_at: Instant,
    lifetime: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message: message.into(),
            stage: None,
            raised_at: Instant::now(),
            lifetime: severity.lifetime(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Tags the notice with the stage it reports on.
    #[must_use]
    pub fn for_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Replaces the severity's lifetime. `None` keeps the notice until dismissed.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    #[must_use]
    pub fn raised_at(&self) -> Instant {
        self.raised_at
    }

    /// Whether the notice has outlived its lifetime at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.lifetime
            .is_some_and(|lifetime| now.saturating_duration_since(self.raised_at) >= lifetime)
    }
}
