// SPDX-License-Identifier: MPL-2.0
//! Pending operations and their completion events.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;

use crate::application::port::Acknowledgement;
use crate::domain::error::{CaptureError, GeocodeError, SubmissionError};
use crate::domain::geo::Coordinate;
use crate::domain::snapshot::CapturedImage;
use crate::domain::workflow::Stage;

/// Completion of an operation, to be fed back with
/// [`WorkflowController::apply`](super::WorkflowController::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// The geocoder answered.
    Resolved {
        generation: u64,
        result: Result<Coordinate, GeocodeError>,
    },
    /// The capturer finished.
    Captured {
        generation: u64,
        result: Result<CapturedImage, CaptureError>,
    },
    /// The backend answered.
    Submitted {
        generation: u64,
        result: Result<Acknowledgement, SubmissionError>,
    },
}

impl WorkflowEvent {
    /// Generation of the request that produced this event.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            WorkflowEvent::Resolved { generation, .. }
            | WorkflowEvent::Captured { generation, .. }
            | WorkflowEvent::Submitted { generation, .. } => *generation,
        }
    }

    /// Stage the event completes.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            WorkflowEvent::Resolved { .. } => Stage::Search,
            WorkflowEvent::Captured { .. } => Stage::Capture,
            WorkflowEvent::Submitted { .. } => Stage::Submit,
        }
    }
}

/// What [`WorkflowController::apply`](super::WorkflowController::apply) did
/// with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event moved the workflow.
    Applied,
    /// The event belonged to a superseded request and was dropped.
    Stale,
}

/// An issued request, not yet completed.
///
/// Owns everything it needs, so it can be awaited inline, spawned on a
/// runtime or dropped. Dropping it leaves the workflow busy until a new
/// search, which is accepted in every state, supersedes it.
#[must_use = "a pending operation does nothing until awaited"]
pub struct PendingOperation {
    stage: Stage,
    generation: u64,
    future: BoxFuture<'static, WorkflowEvent>,
}

impl PendingOperation {
    pub(super) fn new(
        stage: Stage,
        generation: u64,
        future: impl Future<Output = WorkflowEvent> + Send + 'static,
    ) -> Self {
        Self {
            stage,
            generation,
            future: Box::pin(future),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Future for PendingOperation {
    type Output = WorkflowEvent;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOperation")
            .field("stage", &self.stage)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
