// SPDX-License-Identifier: MPL-2.0
//! Workflow state machine.
//!
//! The whole search → capture → submit process is one tagged state. Every
//! change goes through [`WorkflowState::next`], so at most one stage can be
//! in flight and the captured image only exists where the state says so.
//!
//! ```text
//! Idle ─search─► Searching ─resolved─► Located ─capture─► Capturing ─captured─► Captured
//!                  │     │                ▲                  │                 │    ▲
//!        not found │     │ failed         └──── failed ──────┘          submit │    │ failed
//!                  ▼     ▼                                                      ▼    │
//!                Idle   Failed ─acknowledge─► Idle          Submitted ◄─ok─ Submitting
//! ```

use std::fmt;

use super::snapshot::CapturedImage;

/// The stage an in-flight operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Geocoding a query.
    Search,
    /// Settling and rasterizing the viewport.
    Capture,
    /// Sending the captured image.
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Search => "search",
            Stage::Capture => "capture",
            Stage::Submit => "submit",
        })
    }
}

/// Where the workflow currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    /// Nothing located yet, or the last search found nothing.
    #[default]
    Idle,
    /// Waiting for the geocoder.
    Searching,
    /// The viewport shows the located query.
    Located,
    /// Waiting for the settle delay and rasterization.
    Capturing,
    /// A snapshot is held and may be submitted or replaced.
    Captured(CapturedImage),
    /// The held snapshot is being sent.
    Submitting(CapturedImage),
    /// The last snapshot was accepted by the backend.
    Submitted,
    /// The geocoder could not be reached. Recoverable by searching again.
    Failed(String),
}

/// Something that moves the workflow from one state to another.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowInput {
    /// The user issued a search.
    SearchRequested,
    /// The geocoder returned a coordinate.
    SearchResolved,
    /// The geocoder returned no match.
    SearchNotFound,
    /// The geocoder failed.
    SearchFailed(String),
    /// The user asked for a snapshot.
    CaptureRequested,
    /// A snapshot was produced.
    CaptureSucceeded(CapturedImage),
    /// Rasterization failed or the surface was unavailable.
    CaptureFailed,
    /// The user confirmed submission.
    SubmitRequested,
    /// The backend accepted the snapshot.
    SubmitSucceeded,
    /// The backend rejected the snapshot or could not be reached.
    SubmitFailed,
    /// The user dismissed a failure.
    FailureAcknowledged,
}

impl WorkflowInput {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowInput::SearchRequested => "search",
            WorkflowInput::SearchResolved => "search-resolved",
            WorkflowInput::SearchNotFound => "search-not-found",
            WorkflowInput::SearchFailed(_) => "search-failed",
            WorkflowInput::CaptureRequested => "capture",
            WorkflowInput::CaptureSucceeded(_) => "capture-succeeded",
            WorkflowInput::CaptureFailed => "capture-failed",
            WorkflowInput::SubmitRequested => "submit",
            WorkflowInput::SubmitSucceeded => "submit-succeeded",
            WorkflowInput::SubmitFailed => "submit-failed",
            WorkflowInput::FailureAcknowledged => "acknowledge-failure",
        }
    }
}

/// An input that the current state does not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    /// Name of the state that rejected the input.
    pub state: &'static str,
    /// Name of the rejected input.
    pub input: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not allowed while {}", self.input, self.state)
    }
}

impl std::error::Error for InvalidTransition {}

impl WorkflowState {
    /// Computes the state reached by applying `input`.
    ///
    /// The current state is left untouched; callers replace it with the
    /// returned value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if `input` is not accepted in this state.
    pub fn next(&self, input: &WorkflowInput) -> Result<WorkflowState, InvalidTransition> {
        use WorkflowInput as I;
        use WorkflowState as S;

        let next = match (self, input) {
            (_, I::SearchRequested) => Some(S::Searching),

            (S::Searching, I::SearchResolved) => Some(S::Located),
            (S::Searching, I::SearchNotFound) => Some(S::Idle),
            (S::Searching, I::SearchFailed(reason)) => Some(S::Failed(reason.clone())),

            (S::Located | S::Captured(_), I::CaptureRequested) => Some(S::Capturing),
            (S::Capturing, I::CaptureSucceeded(image)) => Some(S::Captured(image.clone())),
            (S::Capturing, I::CaptureFailed) => Some(S::Located),

            (S::Captured(image), I::SubmitRequested) => Some(S::Submitting(image.clone())),
            (S::Submitting(_), I::SubmitSucceeded) => Some(S::Submitted),
            (S::Submitting(image), I::SubmitFailed) => Some(S::Captured(image.clone())),

            (S::Failed(_), I::FailureAcknowledged) => Some(S::Idle),

            _ => None,
        };

        next.ok_or(InvalidTransition {
            state: self.name(),
            input: input.name(),
        })
    }

    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Searching => "searching",
            WorkflowState::Located => "located",
            WorkflowState::Capturing => "capturing",
            WorkflowState::Captured(_) => "captured",
            WorkflowState::Submitting(_) => "submitting",
            WorkflowState::Submitted => "submitted",
            WorkflowState::Failed(_) => "failed",
        }
    }

    /// The stage currently in flight, if any.
    #[must_use]
    pub fn busy_stage(&self) -> Option<Stage> {
        match self {
            WorkflowState::Searching => Some(Stage::Search),
            WorkflowState::Capturing => Some(Stage::Capture),
            WorkflowState::Submitting(_) => Some(Stage::Submit),
            _ => None,
        }
    }

    /// Returns true while an operation is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy_stage().is_some()
    }

    /// The held snapshot, while captured or being submitted.
    #[must_use]
    pub fn captured_image(&self) -> Option<&CapturedImage> {
        match self {
            WorkflowState::Captured(image) | WorkflowState::Submitting(image) => Some(image),
            _ => None,
        }
    }

    /// The failure reason, if failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Returns true if a search may be issued.
    #[must_use]
    pub fn can_search(&self) -> bool {
        self.next(&WorkflowInput::SearchRequested).is_ok()
    }

    /// Returns true if a capture may be issued.
    #[must_use]
    pub fn can_capture(&self) -> bool {
        self.next(&WorkflowInput::CaptureRequested).is_ok()
    }

    /// Returns true if a submission may be issued.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.next(&WorkflowInput::SubmitRequested).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> CapturedImage {
        CapturedImage::from_png(vec![0x89, b'P', b'N', b'G'], 1, 1)
    }

    fn all_states() -> Vec<WorkflowState> {
        vec![
            WorkflowState::Idle,
            WorkflowState::Searching,
            WorkflowState::Located,
            WorkflowState::Capturing,
            WorkflowState::Captured(image()),
            WorkflowState::Submitting(image()),
            WorkflowState::Submitted,
            WorkflowState::Failed("offline".into()),
        ]
    }

    #[test]
    fn search_is_allowed_from_every_state() {
        for state in all_states() {
            assert!(state.can_search(), "state {}", state.name());
        }
    }

    #[test]
    fn search_abandons_a_submission_and_its_image() {
        let searching = WorkflowState::Submitting(image())
            .next(&WorkflowInput::SearchRequested)
            .unwrap();
        assert_eq!(searching, WorkflowState::Searching);
        assert!(searching.captured_image().is_none());
    }

    #[test]
    fn capture_only_from_located_or_captured() {
        for state in all_states() {
            let expected = matches!(state, WorkflowState::Located | WorkflowState::Captured(_));
            assert_eq!(state.can_capture(), expected, "state {}", state.name());
        }
    }

    #[test]
    fn submit_only_from_captured() {
        for state in all_states() {
            let expected = matches!(state, WorkflowState::Captured(_));
            assert_eq!(state.can_submit(), expected, "state {}", state.name());
        }
    }

    #[test]
    fn at_most_one_stage_is_busy() {
        for state in all_states() {
            let busy = [
                matches!(state, WorkflowState::Searching),
                matches!(state, WorkflowState::Capturing),
                matches!(state, WorkflowState::Submitting(_)),
            ];
            assert!(busy.iter().filter(|b| **b).count() <= 1);
            assert_eq!(state.is_busy(), busy.iter().any(|b| *b));
        }
    }

    #[test]
    fn search_outcomes() {
        let searching = WorkflowState::Searching;
        assert_eq!(
            searching.next(&WorkflowInput::SearchResolved),
            Ok(WorkflowState::Located)
        );
        assert_eq!(
            searching.next(&WorkflowInput::SearchNotFound),
            Ok(WorkflowState::Idle)
        );
        assert_eq!(
            searching.next(&WorkflowInput::SearchFailed("down".into())),
            Ok(WorkflowState::Failed("down".into()))
        );
    }

    #[test]
    fn capture_failure_returns_to_located_and_drops_image() {
        let state = WorkflowState::Captured(image());
        let capturing = state.next(&WorkflowInput::CaptureRequested).unwrap();
        assert_eq!(capturing, WorkflowState::Capturing);
        let back = capturing.next(&WorkflowInput::CaptureFailed).unwrap();
        assert_eq!(back, WorkflowState::Located);
        assert!(back.captured_image().is_none());
    }

    #[test]
    fn failed_submission_keeps_the_same_image() {
        let captured = WorkflowState::Captured(image());
        let submitting = captured.next(&WorkflowInput::SubmitRequested).unwrap();
        let restored = submitting.next(&WorkflowInput::SubmitFailed).unwrap();
        let before = captured.captured_image().unwrap();
        let after = restored.captured_image().unwrap();
        assert!(before.shares_data_with(after));
    }

    #[test]
    fn successful_submission_clears_image() {
        let submitting = WorkflowState::Submitting(image());
        let done = submitting.next(&WorkflowInput::SubmitSucceeded).unwrap();
        assert_eq!(done, WorkflowState::Submitted);
        assert!(done.captured_image().is_none());
    }

    #[test]
    fn rejected_input_reports_names() {
        let err = WorkflowState::Searching
            .next(&WorkflowInput::SubmitRequested)
            .unwrap_err();
        assert_eq!(err.state, "searching");
        assert_eq!(err.input, "submit");
    }

    #[test]
    fn acknowledging_failure_returns_to_idle() {
        let failed = WorkflowState::Failed("offline".into());
        assert_eq!(failed.failure_reason(), Some("offline"));
        assert_eq!(
            failed.next(&WorkflowInput::FailureAcknowledged),
            Ok(WorkflowState::Idle)
        );
        assert!(WorkflowState::Idle
            .next(&WorkflowInput::FailureAcknowledged)
            .is_err());
    }

    #[test]
    fn stale_completions_are_rejected_outside_their_stage() {
        assert!(WorkflowState::Idle
            .next(&WorkflowInput::SearchResolved)
            .is_err());
        assert!(WorkflowState::Searching
            .next(&WorkflowInput::CaptureSucceeded(image()))
            .is_err());
    }
}
