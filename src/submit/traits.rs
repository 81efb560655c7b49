//! Trait abstraction for the submission client to enable mocking in tests

use super::payload::{SubmissionPayload, SubmitError, SubmitReceipt};
use async_trait::async_trait;

/// Anything that can deliver a flattened application record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Check whether the logging endpoint answers at all
    async fn check_endpoint(&self) -> bool;

    /// Send one record and report what the endpoint said about it
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError>;
}
