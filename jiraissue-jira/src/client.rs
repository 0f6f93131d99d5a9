use std::fmt::Write as _;

use jiraissue_core::{JiraAuth, JiraIssueConfig};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, Request};
use tracing::debug;

/// Represents a Jira API client
///
/// Holds only read-only configuration, so one instance is shared by every
/// concurrent submission of a batch.
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
  pub(crate) debug: bool,
  pub(crate) dry_run: bool,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
      debug: false,
      dry_run: false,
    }
  }

  /// Create a client from resolved configuration
  pub fn from_config(config: &JiraIssueConfig) -> Self {
    Self::new(&config.base_url, config.auth.clone())
      .with_debug(config.debug)
      .with_dry_run(config.dry_run)
  }

  /// Dump every request and response
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  /// Build requests without sending them
  pub fn with_dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  pub(crate) fn dump_request(&self, request: &Request) {
    if !self.debug {
      return;
    }

    let body = request
      .body()
      .and_then(|body| body.as_bytes())
      .map(pretty_body)
      .unwrap_or_default();

    debug!(
      "Request::> {} {}\n{}\n{}",
      request.method(),
      request.url(),
      format_headers(request.headers()),
      body
    );
  }

  /// Dumped before the body is read so a failed read still shows the response.
  pub(crate) fn dump_response_head(&self, status: reqwest::StatusCode, headers: &HeaderMap) {
    if !self.debug {
      return;
    }

    debug!("Response::> {}\n{}", status, format_headers(headers));
  }

  pub(crate) fn dump_response_body(&self, body: &[u8]) {
    if !self.debug {
      return;
    }

    debug!("Response body::>\n{}", pretty_body(body));
  }
}

/// Render headers one per line, hiding credentials.
fn format_headers(headers: &HeaderMap) -> String {
  let mut rendered = String::new();
  for (name, value) in headers {
    let value = if *name == AUTHORIZATION {
      "<redacted>"
    } else {
      value.to_str().unwrap_or("<binary>")
    };
    let _ = writeln!(rendered, "{name}: {value}");
  }
  rendered
}

/// Pretty-print a JSON body, falling back to the raw text.
fn pretty_body(body: &[u8]) -> String {
  serde_json::from_slice::<serde_json::Value>(body)
    .ok()
    .and_then(|value| serde_json::to_string_pretty(&value).ok())
    .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}
