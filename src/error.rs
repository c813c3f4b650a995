// SPDX-License-Identifier: MPL-2.0
//! Crate-level errors.
//!
//! [`Error`] covers setup concerns (configuration files, HTTP client
//! construction). [`WorkflowError`] covers requests the workflow refuses.
//! Failures of the collaborators themselves live in
//! [`crate::domain::error`] and are turned into notifications, not returned.

use crate::domain::workflow::InvalidTransition;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("HTTP Error: {0}")]
    Http(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A workflow request that was refused. The workflow state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The search text was empty or whitespace only.
    #[error("Please enter a location or pincode")]
    EmptyQuery,
    /// The request does not fit the current state.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}
