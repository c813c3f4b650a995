// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap HTTP services and image codecs.
//!
//! # Available Adapters
//!
//! - [`nominatim`]: Geocoding via a Nominatim search endpoint (implements [`GeocodeResolver`])
//! - [`tiles`]: Web map tile rendering (implements [`RenderSurface`])
//! - [`http_submission`]: JSON POST of snapshots (implements [`SubmissionClient`])
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Each is built from its section of [`Config`](crate::config::Config)
//!
//! [`GeocodeResolver`]: crate::application::port::GeocodeResolver
//! [`RenderSurface`]: crate::application::port::RenderSurface
//! [`SubmissionClient`]: crate::application::port::SubmissionClient

pub mod http_submission;
pub mod nominatim;
pub mod tiles;

// Re-export main types for convenience
pub use http_submission::HttpSubmissionClient;
pub use nominatim::NominatimResolver;
pub use tiles::TileSurface;
