//! Submission of completed applications to the spreadsheet logging endpoint

mod client;
mod payload;
mod traits;

pub use client::SubmissionClient;
pub use payload::{ensure_complete, SubmissionPayload, SubmitError, SubmitReceipt};
pub use traits::Submitter;

#[cfg(test)]
pub use traits::MockSubmitter;
