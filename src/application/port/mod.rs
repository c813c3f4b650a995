// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`geocoding`]: Query to coordinate lookup
//! - [`render`]: The map rendering surface
//! - [`submission`]: Snapshot delivery to a backend
//!
//! # Design Notes
//!
//! - All traits use domain types only (no HTTP or rendering-engine types)
//! - Traits are `Send + Sync` so they can be shared behind `Arc<dyn _>`
//! - Methods are `async` through `async_trait` to stay object safe

pub mod geocoding;
pub mod render;
pub mod submission;

pub use geocoding::GeocodeResolver;
pub use render::RenderSurface;
pub use submission::{Acknowledgement, SubmissionClient};
