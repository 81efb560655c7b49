//! HTTP client for the spreadsheet logging endpoint
//!
//! The endpoint appends one spreadsheet row per POSTed JSON record and
//! answers with a small JSON result. A plain GET returns a liveness string.

use super::payload::{EndpointResponse, SubmissionPayload, SubmitError, SubmitReceipt};
use super::traits::Submitter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the logging endpoint
pub struct SubmissionClient {
    http: Client,
    endpoint: String,
}

impl SubmissionClient {
    /// Build a client for `endpoint`, identifying as `user_agent`
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check if the endpoint is reachable
    pub async fn check_endpoint(&self) -> bool {
        match self.http.get(&self.endpoint).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Endpoint check failed: {e}");
                false
            }
        }
    }

    /// POST one record and interpret the answer
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        interpret_body(&body)
    }
}

/// Turn a 2xx body into a receipt or a rejection
fn interpret_body(body: &str) -> Result<SubmitReceipt, SubmitError> {
    match serde_json::from_str::<EndpointResponse>(body) {
        Ok(EndpointResponse::Success { row, message }) => {
            tracing::debug!("Endpoint confirmed {row:?} columns: {message}");
            Ok(SubmitReceipt::Confirmed { columns: row })
        }
        Ok(EndpointResponse::Error { error, message }) => {
            Err(SubmitError::Rejected { message, error })
        }
        Err(_) => {
            tracing::warn!(
                "Endpoint accepted the request but returned no readable result ({} bytes)",
                body.len()
            );
            Ok(SubmitReceipt::Unconfirmed)
        }
    }
}

#[async_trait]
impl Submitter for SubmissionClient {
    async fn check_endpoint(&self) -> bool {
        SubmissionClient::check_endpoint(self).await
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError> {
        SubmissionClient::submit(self, payload).await
    }
}
