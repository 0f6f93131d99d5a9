//! # Jira Issue Creation
//!
//! Builds Jira issue creation payloads, expands semicolon-delimited batch
//! files into issues and submits them concurrently against the Jira REST API,
//! reporting one outcome per issue.

mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;

pub mod batch;
pub mod payload;
pub mod runner;

pub use batch::{BatchError, expand_batch, expand_batch_file};
// Re-export the client
pub use client::JiraClient;
pub use error::SubmitError;
// Re-export models
pub use models::{CreatedIssue, DocNode, IdRef, IssueAttributes, IssueFields, IssuePayload, KeyRef, NameRef};
pub use payload::build_payload;
pub use runner::{BatchOutcome, IssueOutcome, run_batch};
