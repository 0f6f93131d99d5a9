//! # jiraissue Core Library
//!
//! Configuration, Jira URL helpers and terminal output shared by the
//! jiraissue client and command-line crates. Nothing here talks to the
//! network.

pub mod config;
pub mod output;
pub mod url;

pub use config::{ConfigError, ConfigFile, ConfigOverrides, IssueDefaults, JiraAuth, JiraIssueConfig};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
