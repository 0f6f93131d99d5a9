//! # Issue Creation
//!
//! Turns the parsed flags or batch file into payloads, submits them and
//! reports each outcome as it arrives.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use jiraissue_core::output::{batch_summary_message, issue_created_message, issue_failed_message};
use jiraissue_core::{IssueDefaults, JiraIssueConfig, print_error, print_info, print_success, print_warning};
use jiraissue_jira::{IssueAttributes, IssueOutcome, IssuePayload, JiraClient, build_payload, expand_batch_file, run_batch};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::IssueArgs;

/// Issues described by the command line: the batch file when given,
/// otherwise the single issue from the flags.
pub(crate) fn collect_issues(
  args: &IssueArgs,
  file: Option<&Path>,
  defaults: &IssueDefaults,
) -> Result<Vec<IssueAttributes>> {
  match file {
    Some(path) => {
      let issues = expand_batch_file(path, defaults)
        .with_context(|| format!("Failed to load batch file {}", path.display()))?;
      info!("Loaded {} issue(s) from {}", issues.len(), path.display());
      Ok(issues)
    }
    None => Ok(vec![single_issue(args, defaults)?]),
  }
}

fn single_issue(args: &IssueArgs, defaults: &IssueDefaults) -> Result<IssueAttributes> {
  let summary = args.summary.as_deref().map(str::trim).unwrap_or_default();
  if summary.is_empty() {
    bail!("--summary is required and must not be empty when creating a single issue");
  }

  let mut attrs = IssueAttributes::new(summary, defaults);
  attrs.description = non_empty(args.description.as_deref());
  attrs.time_estimate = non_empty(args.time_estimate.as_deref());
  attrs.epic = non_empty(args.epic.as_deref());
  attrs.fix_version = non_empty(args.fix_version.as_deref());
  attrs.components = list(&args.components);
  attrs.labels = list(&args.labels);

  Ok(attrs)
}

fn non_empty(value: Option<&str>) -> Option<String> {
  value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn list(values: &[String]) -> Vec<String> {
  values
    .iter()
    .map(|value| value.trim())
    .filter(|value| !value.is_empty())
    .map(str::to_string)
    .collect()
}

/// Submit every issue concurrently and report the outcomes.
///
/// Exits non-zero if any issue failed, even when others were created.
pub(crate) fn submit_issues(config: &JiraIssueConfig, issues: Vec<IssueAttributes>) -> Result<ExitCode> {
  let payloads: Vec<IssuePayload> = issues.iter().map(build_payload).collect();
  let client = Arc::new(JiraClient::from_config(config));

  if config.dry_run {
    print_info("Dry run: requests are built but not sent");
  }

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(run_batch(client, payloads, shutdown_signal(), |outcome| {
    report_outcome(config, outcome);
  }));

  if outcome.len() > 1 {
    let message = batch_summary_message(outcome.created_count(), outcome.len(), outcome.failed_count());
    if outcome.all_created() {
      print_info(&message);
    } else {
      print_warning(&message);
    }
  }

  Ok(if outcome.all_created() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}

fn report_outcome(config: &JiraIssueConfig, outcome: &IssueOutcome) {
  match &outcome.result {
    Ok(key) => print_success(&issue_created_message(&config.issue_link(key))),
    Err(err) => print_error(&issue_failed_message(&outcome.summary, &err.to_string())),
  }
}

/// Resolves on Ctrl-C. Never resolves if the signal handler can't be
/// installed.
async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    warn!("Failed to listen for Ctrl-C: {err}");
    std::future::pending::<()>().await;
  }
}
