//! Constants for the jiraissue Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jiraissue/", env!("CARGO_PKG_VERSION"));

/// Issue creation endpoint, relative to the Jira base URL
pub const CREATE_ISSUE_PATH: &str = "/rest/api/3/issue";

/// Suffix appended to the project key to form the fake key of a dry run
pub const DRY_RUN_KEY_SUFFIX: &str = "dry-run";

/// Number of positional columns in a batch file row
pub const BATCH_COLUMNS: usize = 7;

/// Longest slice of an unstructured error body kept in an error message
pub const BODY_EXCERPT_CHARS: usize = 200;
