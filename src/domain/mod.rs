// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`GeocodeError`](error::GeocodeError),
//!   [`CaptureError`](error::CaptureError), [`SubmissionError`](error::SubmissionError))
//! - [`geo`]: Geographic values ([`Coordinate`](geo::Coordinate),
//!   [`LocationQuery`](geo::LocationQuery), [`TileStyle`](geo::TileStyle),
//!   [`ViewportState`](geo::ViewportState), [`ZoomLevel`](geo::ZoomLevel))
//! - [`snapshot`]: Captured pixels ([`RasterFrame`](snapshot::RasterFrame),
//!   [`CapturedImage`](snapshot::CapturedImage), [`ScaleFactor`](snapshot::ScaleFactor))
//! - [`workflow`]: The process state machine ([`WorkflowState`](workflow::WorkflowState))

pub mod error;
pub mod geo;
pub mod snapshot;
pub mod workflow;
