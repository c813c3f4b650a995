// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns. Each collaborator of the
//! workflow has its own error enum so the controller can map every failure
//! onto exactly one state transition.

use std::fmt;

// =============================================================================
// GeoError
// =============================================================================

/// Invalid geographic input.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// The location query is empty or whitespace only.
    EmptyQuery,
    /// Latitude is not a finite value within `[-90, 90]`.
    LatitudeOutOfRange(f64),
    /// Longitude is not a finite value within `[-180, 180]`.
    LongitudeOutOfRange(f64),
    /// The tile style name is not recognized.
    UnknownStyle(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::EmptyQuery => write!(f, "Location query is empty"),
            GeoError::LatitudeOutOfRange(v) => write!(f, "Latitude out of range: {v}"),
            GeoError::LongitudeOutOfRange(v) => write!(f, "Longitude out of range: {v}"),
            GeoError::UnknownStyle(name) => write!(f, "Unknown tile style: {name}"),
        }
    }
}

impl std::error::Error for GeoError {}

// =============================================================================
// GeocodeError
// =============================================================================

/// Failure to resolve a query to a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeError {
    /// The lookup succeeded but returned no candidates. Informational.
    NotFound,
    /// The lookup service was unreachable or answered with something unusable.
    TransportFailure(String),
}

impl GeocodeError {
    /// Returns true for the informational "no match" outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound)
    }
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::NotFound => write!(f, "Location not found."),
            GeocodeError::TransportFailure(msg) => write!(f, "Error fetching location: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

// =============================================================================
// CaptureError
// =============================================================================

/// Failure to snapshot the rendered viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The render target is not attached or has not presented a view yet.
    RenderUnavailable,
    /// Rasterization or encoding failed.
    CaptureFailure(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::RenderUnavailable => write!(f, "Map is not ready to be captured"),
            CaptureError::CaptureFailure(msg) => write!(f, "Failed to capture map: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

// =============================================================================
// SubmissionError
// =============================================================================

/// Failure to deliver a captured image to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// The backend answered with a non-success status.
    Rejected { status: u16 },
    /// The request could not be sent or the response could not be read.
    Transport(String),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Rejected { status } => {
                write!(f, "Failed to submit map: backend returned status {status}")
            }
            SubmissionError::Transport(msg) => write!(f, "Failed to submit map: {msg}"),
        }
    }
}

impl std::error::Error for SubmissionError {}
