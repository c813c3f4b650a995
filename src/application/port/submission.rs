// SPDX-License-Identifier: MPL-2.0
//! Submission port definition.

use async_trait::async_trait;

use crate::domain::error::SubmissionError;
use crate::domain::snapshot::CapturedImage;

/// Backend acknowledgement of an accepted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Success status returned by the backend.
    pub status: u16,
}

/// Port for delivering a snapshot and the query that produced it.
///
/// A single request per call. The paired text is sent as-is, even when empty.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Sends `image` together with `location`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] on any non-success status or transport fault.
    async fn submit(
        &self,
        image: &CapturedImage,
        location: &str,
    ) -> Result<Acknowledgement, SubmissionError>;
}
