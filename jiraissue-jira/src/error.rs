//! Error types for issue submission

use thiserror::Error;

/// Why a single issue could not be created
///
/// Transport-class errors mean the remote could not be reached or its answer
/// could not be read; a rejection means the remote understood the payload and
/// refused it.
#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("failed to reach Jira: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Jira returned an unreadable response (HTTP {status}): {source}")]
  MalformedBody {
    status: u16,
    #[source]
    source: serde_json::Error,
  },

  #[error("Jira answered HTTP {status} without a Jira error body: {body}")]
  UnstructuredError { status: u16, body: String },

  #[error("Jira rejected the issue (HTTP {status}): {detail}")]
  ApiRejection { status: u16, detail: String },

  #[error("Jira answered HTTP {status} but the response has no issue key; the issue may still have been created")]
  ResponseParse { status: u16 },

  #[error("submission was cancelled before it completed")]
  Cancelled,

  #[error("submission task failed: {0}")]
  Aborted(String),
}

impl SubmitError {
  /// The remote could not be reached or its response could not be decoded,
  /// including error statuses that carry no Jira error document.
  pub fn is_transport(&self) -> bool {
    matches!(
      self,
      SubmitError::Transport(_) | SubmitError::MalformedBody { .. } | SubmitError::UnstructuredError { .. }
    )
  }

  /// The remote explicitly refused the payload.
  pub fn is_rejection(&self) -> bool {
    matches!(self, SubmitError::ApiRejection { .. })
  }
}
