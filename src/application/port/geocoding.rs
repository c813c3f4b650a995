// SPDX-License-Identifier: MPL-2.0
//! Geocoding port definition.
//!
//! This module defines the [`GeocodeResolver`] trait that turns a free-text
//! query into a single coordinate.
//!
//! # Design Notes
//!
//! - One attempt per call; no retry or backoff
//! - The best match is the first entry of the provider's ordered list
//! - Zero matches is [`GeocodeError::NotFound`], not a transport fault
//! - Resolvers never touch workflow state; the controller applies results

use async_trait::async_trait;

use crate::domain::error::GeocodeError;
use crate::domain::geo::{Coordinate, LocationQuery};

/// Port for resolving location queries.
///
/// # Example
///
/// ```ignore
/// use map_capture::application::port::GeocodeResolver;
/// use map_capture::domain::geo::LocationQuery;
///
/// async fn center_of(resolver: &dyn GeocodeResolver) {
///     let query = LocationQuery::new("10001").unwrap();
///     match resolver.resolve(&query).await {
///         Ok(coordinate) => println!("found {coordinate}"),
///         Err(err) => println!("{err}"),
///     }
/// }
/// ```
#[async_trait]
pub trait GeocodeResolver: Send + Sync {
    /// Resolves `query` to the provider's best match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] when the provider has no candidate,
    /// or [`GeocodeError::TransportFailure`] when it cannot be reached or
    /// answers with a malformed response.
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, GeocodeError>;
}
