// SPDX-License-Identifier: MPL-2.0
//! `map_capture` turns a free-text location into a map snapshot and submits it.
//!
//! A [`WorkflowController`](workflow::WorkflowController) sequences three
//! collaborators: a geocoder, a map rendering surface and a submission
//! endpoint. Each sits behind a port trait in [`application::port`], with
//! HTTP-backed defaults in [`infrastructure`].
//!
//! ```ignore
//! use map_capture::{config, workflow::WorkflowController};
//!
//! let config = config::load()?;
//! let mut controller = WorkflowController::with_defaults(&config)?;
//!
//! let search = controller.search("Eiffel Tower")?;
//! controller.run(search).await;
//! let capture = controller.capture()?;
//! controller.run(capture).await;
//! let submit = controller.submit()?;
//! controller.run(submit).await;
//! ```

#![doc(html_root_url = "https://docs.rs/map_capture/0.1.0")]

pub mod application;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod notifications;
pub mod viewport;
pub mod workflow;

#[cfg(test)]
mod test_utils;
