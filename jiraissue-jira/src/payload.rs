//! # Issue Payload Builder
//!
//! Turns flat [`IssueAttributes`] into the nested document the issue
//! creation endpoint expects. Pure: no I/O and no validation, which happens
//! upstream when attributes are constructed.

use crate::models::{DocNode, IdRef, IssueAttributes, IssueFields, IssuePayload, KeyRef, NameRef};

/// Build the creation payload for one issue.
///
/// Empty optional text is omitted from the document entirely; Jira rejects an
/// empty ADF description. Labels are always sent as a list.
pub fn build_payload(attrs: &IssueAttributes) -> IssuePayload {
  let description = present(&attrs.description).map(DocNode::document);
  let parent = present(&attrs.epic).map(|key| KeyRef { key: key.to_string() });
  let fix_versions = present(&attrs.fix_version)
    .map(|name| vec![NameRef { name: name.to_string() }])
    .unwrap_or_default();

  IssuePayload {
    fields: IssueFields {
      summary: attrs.summary.clone(),
      description,
      issue_type: NameRef {
        name: attrs.issue_type.clone(),
      },
      project: KeyRef {
        key: attrs.project_key.clone(),
      },
      priority: IdRef {
        id: attrs.priority_id.clone(),
      },
      assignee: IdRef {
        id: attrs.assignee_id.clone(),
      },
      parent,
      labels: attrs.labels.clone(),
      components: attrs
        .components
        .iter()
        .map(|name| NameRef { name: name.clone() })
        .collect(),
      fix_versions,
    },
  }
}

fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}
