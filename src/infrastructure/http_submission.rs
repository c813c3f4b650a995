// SPDX-License-Identifier: MPL-2.0
//! Snapshot submission as a JSON POST.
//!
//! The body is `{"image": "data:image/png;base64,...", "location": "<query>"}`.
//! Any 2xx status counts as accepted.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::application::port::{Acknowledgement, SubmissionClient};
use crate::config::SubmissionConfig;
use crate::domain::error::SubmissionError;
use crate::domain::snapshot::CapturedImage;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
struct SubmissionPayload<'a> {
    image: String,
    location: &'a str,
}

/// Renders `image` as a `data:` URI.
#[must_use]
pub fn data_uri(image: &CapturedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type(),
        STANDARD.encode(image.data())
    )
}

/// [`SubmissionClient`] posting to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// Builds a client from the `[submission]` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SubmissionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Http(format!("Failed to create submission client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(
        &self,
        image: &CapturedImage,
        location: &str,
    ) -> std::result::Result<Acknowledgement, SubmissionError> {
        let payload = SubmissionPayload {
            image: data_uri(image),
            location,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(status = status.as_u16(), endpoint = %self.endpoint, "snapshot submitted");
        Ok(Acknowledgement {
            status: status.as_u16(),
        })
    }
}
