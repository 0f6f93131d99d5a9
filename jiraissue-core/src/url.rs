//! # Jira URL Helpers
//!
//! Normalizes the configured Jira host into a base URL and derives the
//! human-readable browse links printed for created issues.

use url::Url;

use crate::config::ConfigError;

/// Domain used when only a Jira Cloud subdomain is configured.
pub const ATLASSIAN_CLOUD_DOMAIN: &str = "atlassian.net";

/// Normalize a Jira host into a base URL without a trailing slash.
///
/// If the host doesn't include a scheme, assumes https://. Malformed schemes
/// like "https:/example.com" are repaired the same way.
pub fn normalize_base_url(input: &str) -> Result<String, ConfigError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(invalid_host(input, "host cannot be empty"));
  }

  let candidate = if has_http_scheme(trimmed) {
    trimmed.to_string()
  } else {
    format!("https://{}", strip_partial_scheme(trimmed).trim_start_matches('/'))
  };

  let url = Url::parse(&candidate).map_err(|err| invalid_host(input, &err.to_string()))?;
  if url.host_str().is_none_or(str::is_empty) {
    return Err(invalid_host(input, "missing host name"));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(invalid_host(input, "query strings and fragments are not allowed"));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Build the Jira Cloud base URL for a subdomain such as `company`.
///
/// A value that already looks like a host name (contains a dot) is used as-is.
pub fn subdomain_base_url(subdomain: &str) -> Result<String, ConfigError> {
  let subdomain = subdomain.trim();
  if subdomain.contains('.') || subdomain.contains('/') {
    return normalize_base_url(subdomain);
  }
  if subdomain.is_empty() {
    return Err(invalid_host(subdomain, "subdomain cannot be empty"));
  }
  normalize_base_url(&format!("https://{subdomain}.{ATLASSIAN_CLOUD_DOMAIN}"))
}

/// Link to an issue in the Jira web UI.
pub fn browse_url(base_url: &str, issue_key: &str) -> String {
  format!("{}/browse/{}", base_url.trim_end_matches('/'), issue_key)
}

fn has_http_scheme(input: &str) -> bool {
  let lowered = input.to_ascii_lowercase();
  lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn strip_partial_scheme(input: &str) -> &str {
  let lowered = input.to_ascii_lowercase();
  for scheme in ["https:", "http:"] {
    if lowered.starts_with(scheme) {
      return &input[scheme.len()..];
    }
  }
  input
}

fn invalid_host(host: &str, reason: &str) -> ConfigError {
  ConfigError::InvalidHost {
    host: host.to_string(),
    reason: reason.to_string(),
  }
}
