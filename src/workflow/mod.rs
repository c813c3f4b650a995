// SPDX-License-Identifier: MPL-2.0
//! Workflow coordination.
//!
//! [`WorkflowController`] owns the [`WorkflowState`], the held query, the map
//! viewport and the notifications. It sequences the three collaborators:
//!
//! 1. [`search`](WorkflowController::search) geocodes a query and, on a match,
//!    centers the viewport on it at the detail zoom.
//! 2. [`capture`](WorkflowController::capture) snapshots the viewport.
//! 3. [`submit`](WorkflowController::submit) sends the snapshot with the query.
//!
//! Each request transitions immediately and hands back a [`PendingOperation`].
//! The caller drives it (await it, or spawn it and forward the event) and
//! passes the resulting [`WorkflowEvent`] to [`apply`](WorkflowController::apply).
//! [`run`](WorkflowController::run) does both in one call.
//!
//! # Stale results
//!
//! Every issued request takes a new generation number. Events carrying an
//! older generation are dropped, so a search issued while a capture is in
//! flight wins even if the capture finishes last.
//!
//! # Failures
//!
//! Collaborator failures never escape as errors. Each one becomes a single
//! notification and the state falls back to the nearest stable state.
//! Only refused requests return a [`WorkflowError`].

mod operation;

pub use operation::{EventOutcome, PendingOperation, WorkflowEvent};

use std::sync::Arc;

use crate::application::port::{Acknowledgement, GeocodeResolver, SubmissionClient};
use crate::capture::{CaptureSettings, SnapshotCapturer};
use crate::config::Config;
use crate::domain::error::{CaptureError, GeocodeError, SubmissionError};
use crate::domain::geo::{Coordinate, LocationQuery, TileStyle, ZoomLevel};
use crate::domain::snapshot::CapturedImage;
use crate::domain::workflow::{InvalidTransition, Stage, WorkflowInput, WorkflowState};
use crate::error::WorkflowError;
use crate::infrastructure::{HttpSubmissionClient, NominatimResolver, TileSurface};
use crate::notifications::{Manager, Notification};
use crate::viewport::MapViewport;

/// Informational notice for a query with no match.
pub const NOT_FOUND_MESSAGE: &str = "Location not found.";
/// Success notice for an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Map submitted successfully!";

/// Coordinates search, capture and submission.
pub struct WorkflowController {
    state: WorkflowState,
    query: Option<LocationQuery>,
    viewport: MapViewport,
    resolver: Arc<dyn GeocodeResolver>,
    capturer: SnapshotCapturer,
    submitter: Arc<dyn SubmissionClient>,
    notifications: Manager,
    generation: u64,
}

impl WorkflowController {
    /// Creates an idle controller over the given collaborators.
    pub fn new(
        viewport: MapViewport,
        resolver: Arc<dyn GeocodeResolver>,
        capturer: SnapshotCapturer,
        submitter: Arc<dyn SubmissionClient>,
    ) -> Self {
        Self {
            state: WorkflowState::Idle,
            query: None,
            viewport,
            resolver,
            capturer,
            submitter,
            notifications: Manager::new(),
            generation: 0,
        }
    }

    /// Builds a controller backed by the HTTP geocoder, the tile surface and
    /// the HTTP submission client, all configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn with_defaults(config: &Config) -> crate::error::Result<Self> {
        let surface = Arc::new(TileSurface::from_config(&config.tiles)?);
        let viewport = MapViewport::new(surface, config.initial_view.viewport_state());
        let resolver = Arc::new(NominatimResolver::from_config(&config.geocoding)?);
        let submitter = Arc::new(HttpSubmissionClient::from_config(&config.submission)?);
        let capturer = SnapshotCapturer::new(CaptureSettings::from(&config.capture));

        Ok(Self::new(viewport, resolver, capturer, submitter))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The query of the latest search, if any.
    #[must_use]
    pub fn query(&self) -> Option<&LocationQuery> {
        self.query.as_ref()
    }

    /// The map viewport.
    #[must_use]
    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    /// The held snapshot, while captured or being submitted.
    #[must_use]
    pub fn captured_image(&self) -> Option<&CapturedImage> {
        self.state.captured_image()
    }

    /// Notices raised so far.
    #[must_use]
    pub fn notifications(&self) -> &Manager {
        &self.notifications
    }

    /// Mutable access for dismissing and expiring notices.
    pub fn notifications_mut(&mut self) -> &mut Manager {
        &mut self.notifications
    }

    /// Generation of the most recently issued request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches the tile source. Allowed in any state.
    pub fn set_style(&mut self, style: TileStyle) {
        self.viewport.set_style(style);
    }

    /// Changes the zoom. Allowed in any state.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.viewport.set_zoom(zoom);
    }

    /// Starts geocoding `text`.
    ///
    /// Accepted in every state and supersedes whatever is in flight. A held
    /// snapshot is dropped. The query is kept as typed and is what a later
    /// submission sends.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::EmptyQuery`] for blank text.
    pub fn search(&mut self, text: &str) -> Result<PendingOperation, WorkflowError> {
        let Ok(query) = LocationQuery::new(text) else {
            let err = WorkflowError::EmptyQuery;
            self.notifications
                .push(Notification::warning(err.to_string()).for_stage(Stage::Search));
            return Err(err);
        };
        let next = self.state.next(&WorkflowInput::SearchRequested)?;
        if let Some(stage) = self.state.busy_stage() {
            tracing::debug!(%stage, "search supersedes in-flight operation");
        }

        let generation = self.issue(next);
        self.query = Some(query.clone());
        tracing::info!(generation, query = %query, "search issued");

        let resolver = Arc::clone(&self.resolver);
        Ok(PendingOperation::new(Stage::Search, generation, async move {
            let result = resolver.resolve(&query).await;
            WorkflowEvent::Resolved { generation, result }
        }))
    }

    /// Starts capturing the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless located or captured.
    pub fn capture(&mut self) -> Result<PendingOperation, WorkflowError> {
        let next = self.state.next(&WorkflowInput::CaptureRequested)?;

        let generation = self.issue(next);
        tracing::info!(generation, "capture issued");

        let capturer = self.capturer.clone();
        let target = self.viewport.render_target();
        Ok(PendingOperation::new(Stage::Capture, generation, async move {
            let result = capturer.capture(&target).await;
            WorkflowEvent::Captured { generation, result }
        }))
    }

    /// Sends the held snapshot with the current query text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless captured.
    pub fn submit(&mut self) -> Result<PendingOperation, WorkflowError> {
        let next = self.state.next(&WorkflowInput::SubmitRequested)?;
        let Some(image) = next.captured_image().cloned() else {
            return Err(InvalidTransition {
                state: self.state.name(),
                input: WorkflowInput::SubmitRequested.name(),
            }
            .into());
        };
        let location = self
            .query
            .as_ref()
            .map(|q| q.as_str().to_string())
            .unwrap_or_default();

        let generation = self.issue(next);
        tracing::info!(generation, bytes = image.len(), "submission issued");

        let submitter = Arc::clone(&self.submitter);
        Ok(PendingOperation::new(Stage::Submit, generation, async move {
            let result = submitter.submit(&image, &location).await;
            WorkflowEvent::Submitted { generation, result }
        }))
    }

    /// Leaves the failed state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless failed.
    pub fn acknowledge_failure(&mut self) -> Result<(), WorkflowError> {
        self.state = self.state.next(&WorkflowInput::FailureAcknowledged)?;
        self.notifications.clear_stage_errors(Stage::Search);
        Ok(())
    }

    /// Applies the completion of a previously issued operation.
    pub fn apply(&mut self, event: WorkflowEvent) -> EventOutcome {
        if event.generation() != self.generation {
            tracing::debug!(
                generation = event.generation(),
                current = self.generation,
                stage = %event.stage(),
                "discarding stale result"
            );
            return EventOutcome::Stale;
        }

        match event {
            WorkflowEvent::Resolved { result, .. } => self.on_resolved(result),
            WorkflowEvent::Captured { result, .. } => self.on_captured(result),
            WorkflowEvent::Submitted { result, .. } => self.on_submitted(result),
        }
    }

    /// Awaits `operation` and applies its event.
    pub async fn run(&mut self, operation: PendingOperation) -> EventOutcome {
        let event = operation.await;
        self.apply(event)
    }

    fn issue(&mut self, next: WorkflowState) -> u64 {
        self.generation += 1;
        self.state = next;
        self.generation
    }

    fn transition(&mut self, input: &WorkflowInput) -> EventOutcome {
        match self.state.next(input) {
            Ok(next) => {
                tracing::debug!(from = self.state.name(), to = next.name(), "transition");
                self.state = next;
                EventOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(%err, "dropping result the current state does not accept");
                EventOutcome::Stale
            }
        }
    }

    fn on_resolved(&mut self, result: Result<Coordinate, GeocodeError>) -> EventOutcome {
        match result {
            Ok(center) => {
                let outcome = self.transition(&WorkflowInput::SearchResolved);
                if outcome == EventOutcome::Applied {
                    tracing::info!(%center, "location resolved");
                    self.viewport.locate(center);
                    self.notifications.clear_stage_errors(Stage::Search);
                }
                outcome
            }
            Err(GeocodeError::NotFound) => {
                let outcome = self.transition(&WorkflowInput::SearchNotFound);
                if outcome == EventOutcome::Applied {
                    self.notifications
                        .push(Notification::info(NOT_FOUND_MESSAGE).for_stage(Stage::Search));
                }
                outcome
            }
            Err(GeocodeError::TransportFailure(reason)) => {
                let outcome = self.transition(&WorkflowInput::SearchFailed(reason.clone()));
                if outcome == EventOutcome::Applied {
                    self.notifications.push(
                        Notification::error(format!("Error fetching location: {reason}"))
                            .for_stage(Stage::Search),
                    );
                }
                outcome
            }
        }
    }

    fn on_captured(&mut self, result: Result<CapturedImage, CaptureError>) -> EventOutcome {
        match result {
            Ok(image) => {
                let outcome = self.transition(&WorkflowInput::CaptureSucceeded(image));
                if outcome == EventOutcome::Applied {
                    self.notifications.clear_stage_errors(Stage::Capture);
                }
                outcome
            }
            Err(err) => {
                let outcome = self.transition(&WorkflowInput::CaptureFailed);
                if outcome == EventOutcome::Applied {
                    self.notifications.push(
                        Notification::error(err.to_string())
                            .for_stage(Stage::Capture),
                    );
                }
                outcome
            }
        }
    }

    fn on_submitted(
        &mut self,
        result: Result<Acknowledgement, SubmissionError>,
    ) -> EventOutcome {
        match result {
            Ok(ack) => {
                let outcome = self.transition(&WorkflowInput::SubmitSucceeded);
                if outcome == EventOutcome::Applied {
                    tracing::info!(status = ack.status, "submission accepted");
                    self.notifications.clear_stage_errors(Stage::Submit);
                    self.notifications
                        .push(Notification::success(SUBMITTED_MESSAGE).for_stage(Stage::Submit));
                }
                outcome
            }
            Err(err) => {
                let outcome = self.transition(&WorkflowInput::SubmitFailed);
                if outcome == EventOutcome::Applied {
                    self.notifications.push(
                        Notification::error(err.to_string())
                            .for_stage(Stage::Submit),
                    );
                }
                outcome
            }
        }
    }
}

impl std::fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowController")
            .field("state", &self.state.name())
            .field("query", &self.query)
            .field("viewport", &self.viewport)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
