//! # Configuration Management
//!
//! Resolves the immutable [`JiraIssueConfig`] used for a whole run. Values are
//! layered from built-in defaults, an optional TOML config file, the process
//! environment and finally explicit command-line overrides. Nothing outside
//! this module reads the environment.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::url::{browse_url, normalize_base_url, subdomain_base_url};

/// Environment variable holding the Jira project key.
pub const ENV_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
/// Environment variable holding the Jira API token.
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable holding the account email paired with the token.
pub const ENV_USER_EMAIL: &str = "JIRA_USER_EMAIL";
/// Environment variable holding the default assignee account id.
pub const ENV_ASSIGNEE_ID: &str = "JIRA_ASSIGNEE_ID";
/// Environment variable holding the Jira Cloud subdomain.
pub const ENV_SUBDOMAIN: &str = "JIRA_SUBDOMAIN";
/// Environment variable holding a full Jira host, which wins over the
/// subdomain.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Environment variable overriding the default issue type.
pub const ENV_ISSUE_TYPE: &str = "JIRA_ISSUE_TYPE";
/// Environment variable overriding the default priority id.
pub const ENV_PRIORITY_ID: &str = "JIRA_PRIORITY_ID";

/// Issue type used when nothing else is configured.
pub const DEFAULT_ISSUE_TYPE: &str = "Story";
/// Priority id used when nothing else is configured.
pub const DEFAULT_PRIORITY_ID: &str = "2";

/// Errors raised while resolving configuration. All of them are fatal and
/// happen before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("required setting '{name}' is not set (set {env} or add it to the config file)")]
  Missing { name: &'static str, env: &'static str },

  #[error("invalid Jira host '{host}': {reason}")]
  InvalidHost { host: String, reason: String },

  #[error("failed to read config file {}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to determine the user configuration directory")]
  NoConfigDir,
}

/// On-disk configuration file. Every key is optional; the API token is
/// deliberately not accepted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub project_key: Option<String>,
  pub host: Option<String>,
  pub subdomain: Option<String>,
  pub user_email: Option<String>,
  pub issue_type: Option<String>,
  pub priority_id: Option<String>,
  pub assignee_id: Option<String>,
}

impl ConfigFile {
  /// Load a config file, returning an empty one if it does not exist.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    if !path.exists() {
      debug!("No config file at {}", path.display());
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Default location of the config file for this user.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
  let proj_dirs = ProjectDirs::from("", "", "jiraissue").ok_or(ConfigError::NoConfigDir)?;
  Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Values supplied explicitly on the command line. They win over every other
/// source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub project_key: Option<String>,
  pub assignee_id: Option<String>,
  pub issue_type: Option<String>,
  pub priority_id: Option<String>,
  pub debug: bool,
  pub dry_run: bool,
}

/// Credentials sent with every request.
#[derive(Clone)]
pub struct JiraAuth {
  /// API token. Without `user_email` it must already be a Basic credential.
  pub api_token: String,
  /// Account email; when present the token is combined with it.
  pub user_email: Option<String>,
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("api_token", &"<redacted>")
      .field("user_email", &self.user_email)
      .finish()
  }
}

/// Values shared by every issue of a run. They are injected into each issue
/// rather than read from batch columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDefaults {
  pub project_key: String,
  pub issue_type: String,
  pub priority_id: String,
  pub assignee_id: String,
}

impl IssueDefaults {
  /// Defaults for a project and assignee with the built-in issue type and
  /// priority.
  pub fn new(project_key: impl Into<String>, assignee_id: impl Into<String>) -> Self {
    Self {
      project_key: project_key.into(),
      issue_type: DEFAULT_ISSUE_TYPE.to_string(),
      priority_id: DEFAULT_PRIORITY_ID.to_string(),
      assignee_id: assignee_id.into(),
    }
  }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct JiraIssueConfig {
  /// Jira base URL without a trailing slash.
  pub base_url: String,
  pub auth: JiraAuth,
  pub defaults: IssueDefaults,
  /// Dump every request and response.
  pub debug: bool,
  /// Build requests but never send them.
  pub dry_run: bool,
}

impl JiraIssueConfig {
  /// Resolve configuration from the given layers.
  ///
  /// `env` looks up a variable by name; empty values are treated as unset.
  pub fn resolve<E>(file: &ConfigFile, env: E, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
  where
    E: Fn(&str) -> Option<String>,
  {
    let lookup = |name: &str| env(name).and_then(non_empty);

    let project_key = first_of([
      overrides.project_key.clone(),
      lookup(ENV_PROJECT_KEY),
      file.project_key.clone(),
    ])
    .ok_or(ConfigError::Missing {
      name: "project key",
      env: ENV_PROJECT_KEY,
    })?;

    let api_token = lookup(ENV_API_TOKEN).ok_or(ConfigError::Missing {
      name: "API token",
      env: ENV_API_TOKEN,
    })?;

    let assignee_id = first_of([
      overrides.assignee_id.clone(),
      lookup(ENV_ASSIGNEE_ID),
      file.assignee_id.clone(),
    ])
    .ok_or(ConfigError::Missing {
      name: "assignee id",
      env: ENV_ASSIGNEE_ID,
    })?;

    let base_url = if let Some(host) = first_of([lookup(ENV_JIRA_HOST), file.host.clone()]) {
      normalize_base_url(&host)?
    } else if let Some(subdomain) = first_of([lookup(ENV_SUBDOMAIN), file.subdomain.clone()]) {
      subdomain_base_url(&subdomain)?
    } else {
      return Err(ConfigError::Missing {
        name: "Jira host",
        env: ENV_SUBDOMAIN,
      });
    };

    let issue_type = first_of([
      overrides.issue_type.clone(),
      lookup(ENV_ISSUE_TYPE),
      file.issue_type.clone(),
    ])
    .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string());

    let priority_id = first_of([
      overrides.priority_id.clone(),
      lookup(ENV_PRIORITY_ID),
      file.priority_id.clone(),
    ])
    .unwrap_or_else(|| DEFAULT_PRIORITY_ID.to_string());

    let user_email = first_of([lookup(ENV_USER_EMAIL), file.user_email.clone()]);

    Ok(Self {
      base_url,
      auth: JiraAuth { api_token, user_email },
      defaults: IssueDefaults {
        project_key,
        issue_type,
        priority_id,
        assignee_id,
      },
      debug: overrides.debug,
      dry_run: overrides.dry_run,
    })
  }

  /// Resolve configuration from the process environment and the config file
  /// at `config_path` (or the default location).
  pub fn from_environment(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
    let path = match config_path {
      Some(path) => path.to_path_buf(),
      None => default_config_path()?,
    };
    let file = ConfigFile::load(&path)?;

    Self::resolve(&file, |name| std::env::var(name).ok(), overrides)
  }

  /// Browse link for a created issue.
  pub fn issue_link(&self, issue_key: &str) -> String {
    browse_url(&self.base_url, issue_key)
  }
}

fn non_empty(value: String) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn first_of<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
  candidates.into_iter().flatten().find_map(non_empty)
}
