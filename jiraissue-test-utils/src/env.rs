//! Environment variable management for testing
//!
//! Tests that touch the process environment restore it on drop so they don't
//! leak settings into each other.

use std::env;

/// Every variable the jiraissue configuration layer reads. Integration tests
/// remove these from child processes so the developer's own Jira settings
/// never leak in.
pub const JIRA_ENV_VARS: &[&str] = &[
  "JIRA_PROJECT_KEY",
  "JIRA_API_TOKEN",
  "JIRA_USER_EMAIL",
  "JIRA_ASSIGNEE_ID",
  "JIRA_SUBDOMAIN",
  "JIRA_HOST",
  "JIRA_ISSUE_TYPE",
  "JIRA_PRIORITY_ID",
];

/// RAII guard for a single environment variable
///
/// Remembers the original value when created and restores it (or removes the
/// variable) when dropped.
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Start guarding `name` without changing its current value
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Guard `name` and remove it for the lifetime of the guard
  pub fn cleared(name: &str) -> Self {
    let guard = Self::new(name);
    guard.remove();
    guard
  }

  /// Set the guarded variable
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the guarded variable
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
