//! # Batch Runner
//!
//! Submits every issue of a batch concurrently and collects one outcome per
//! issue. A failed submission never stops its siblings, nothing is retried,
//! and issues that were created stay created whatever happens to the rest.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use crate::client::JiraClient;
use crate::error::SubmitError;
use crate::models::IssuePayload;

/// Result of submitting one issue
#[derive(Debug)]
pub struct IssueOutcome {
  /// Position of the issue in the submitted batch
  pub index: usize,
  pub summary: String,
  /// Created issue key, or why creation failed
  pub result: Result<String, SubmitError>,
}

impl IssueOutcome {
  pub fn is_success(&self) -> bool {
    self.result.is_ok()
  }
}

/// Every outcome of a batch, in submission order
#[derive(Debug, Default)]
pub struct BatchOutcome {
  pub outcomes: Vec<IssueOutcome>,
}

impl BatchOutcome {
  pub fn len(&self) -> usize {
    self.outcomes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.outcomes.is_empty()
  }

  /// Outcomes whose issue was created
  pub fn successes(&self) -> impl Iterator<Item = &IssueOutcome> {
    self.outcomes.iter().filter(|outcome| outcome.is_success())
  }

  /// Outcomes whose issue was not created
  pub fn failures(&self) -> impl Iterator<Item = &IssueOutcome> {
    self.outcomes.iter().filter(|outcome| !outcome.is_success())
  }

  pub fn created_count(&self) -> usize {
    self.successes().count()
  }

  pub fn failed_count(&self) -> usize {
    self.failures().count()
  }

  /// True when every issue was created
  pub fn all_created(&self) -> bool {
    self.outcomes.iter().all(IssueOutcome::is_success)
  }
}

/// Submit all `issues` concurrently, one task per issue.
///
/// `on_outcome` is called as each submission finishes, in completion order.
/// When `shutdown` resolves, every outstanding submission is aborted and
/// reported as [`SubmitError::Cancelled`]. Returns once every issue has an
/// outcome.
#[instrument(level = "debug", skip_all, fields(issues = issues.len()))]
pub async fn run_batch<S, F>(
  client: Arc<JiraClient>,
  issues: Vec<IssuePayload>,
  shutdown: S,
  mut on_outcome: F,
) -> BatchOutcome
where
  S: Future<Output = ()>,
  F: FnMut(&IssueOutcome),
{
  let summaries: Vec<String> = issues.iter().map(|issue| issue.fields.summary.clone()).collect();
  let mut slots: Vec<Option<IssueOutcome>> = summaries.iter().map(|_| None).collect();

  let mut tasks = JoinSet::new();
  for (index, payload) in issues.into_iter().enumerate() {
    let client = Arc::clone(&client);
    tasks.spawn(async move {
      let result = client.create_issue(&payload).await;
      IssueOutcome {
        index,
        summary: payload.fields.summary,
        result,
      }
    });
  }

  tokio::pin!(shutdown);
  let mut cancelled = false;

  loop {
    tokio::select! {
      joined = tasks.join_next() => match joined {
        Some(Ok(outcome)) => {
          on_outcome(&outcome);
          let index = outcome.index;
          slots[index] = Some(outcome);
        }
        Some(Err(err)) if err.is_cancelled() => {}
        Some(Err(err)) => warn!("Issue submission task failed: {err}"),
        None => break,
      },
      () = &mut shutdown, if !cancelled => {
        warn!("Cancelling {} outstanding issue submission(s)", tasks.len());
        cancelled = true;
        tasks.abort_all();
      }
    }
  }

  // Anything still empty was aborted or panicked before reporting.
  let mut outcomes = Vec::with_capacity(slots.len());
  for (index, (slot, summary)) in slots.into_iter().zip(summaries).enumerate() {
    let outcome = match slot {
      Some(outcome) => outcome,
      None => {
        let error = if cancelled {
          SubmitError::Cancelled
        } else {
          SubmitError::Aborted("task ended without reporting".to_string())
        };
        let outcome = IssueOutcome {
          index,
          summary,
          result: Err(error),
        };
        on_outcome(&outcome);
        outcome
      }
    };
    outcomes.push(outcome);
  }

  let batch = BatchOutcome { outcomes };
  info!(
    "Batch finished: {} created, {} failed",
    batch.created_count(),
    batch.failed_count()
  );
  batch
}
