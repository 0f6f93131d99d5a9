use jiraissue_core::IssueDefaults;
use serde::{Deserialize, Serialize};

/// Flat description of one issue to create
///
/// Project, issue type, priority and assignee are always resolved before an
/// `IssueAttributes` exists; see [`IssueAttributes::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueAttributes {
  pub summary: String,
  pub description: Option<String>,
  /// Parsed and kept, but never serialized into the payload.
  pub time_estimate: Option<String>,
  /// Epic key the issue is parented under.
  pub epic: Option<String>,
  pub issue_type: String,
  pub project_key: String,
  pub priority_id: String,
  pub assignee_id: String,
  pub fix_version: Option<String>,
  pub components: Vec<String>,
  pub labels: Vec<String>,
}

impl IssueAttributes {
  /// Attributes for `summary` with every shared default applied and all
  /// optional fields empty.
  pub fn new(summary: impl Into<String>, defaults: &IssueDefaults) -> Self {
    Self {
      summary: summary.into(),
      description: None,
      time_estimate: None,
      epic: None,
      issue_type: defaults.issue_type.clone(),
      project_key: defaults.project_key.clone(),
      priority_id: defaults.priority_id.clone(),
      assignee_id: defaults.assignee_id.clone(),
      fix_version: None,
      components: Vec::new(),
      labels: Vec::new(),
    }
  }
}

/// Issue creation request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePayload {
  pub fields: IssueFields,
}

/// Represents the `fields` object of an issue creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueFields {
  pub summary: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<DocNode>,
  #[serde(rename = "issuetype")]
  pub issue_type: NameRef,
  pub project: KeyRef,
  pub priority: IdRef,
  pub assignee: IdRef,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent: Option<KeyRef>,
  pub labels: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub components: Vec<NameRef>,
  #[serde(rename = "fixVersions", skip_serializing_if = "Vec::is_empty")]
  pub fix_versions: Vec<NameRef>,
}

/// Node of an Atlassian Document Format tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocNode {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<u8>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub content: Vec<DocNode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

impl DocNode {
  /// ADF version tag on the root document
  pub const VERSION: u8 = 1;

  /// A `doc` holding a single paragraph with a single text node.
  pub fn document(text: &str) -> Self {
    let text_node = Self {
      kind: "text".to_string(),
      version: None,
      content: Vec::new(),
      text: Some(text.to_string()),
    };
    let paragraph = Self {
      kind: "paragraph".to_string(),
      version: None,
      content: vec![text_node],
      text: None,
    };

    Self {
      kind: "doc".to_string(),
      version: Some(Self::VERSION),
      content: vec![paragraph],
      text: None,
    }
  }
}

/// Reference by name (issue type, component, fix version)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRef {
  pub name: String,
}

/// Reference by key (project, parent epic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRef {
  pub key: String,
}

/// Reference by id (priority, assignee)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdRef {
  pub id: String,
}

/// Represents the body Jira returns for a created issue
#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
  pub id: Option<String>,
  pub key: String,
}
