//! # Batch Expansion
//!
//! Parses a semicolon-delimited batch source into [`IssueAttributes`], one
//! per data row. Lines starting with `#` are comments and the first remaining
//! row is a header that is skipped without inspection. Columns are
//! positional:
//!
//! ```text
//! summary;description;time;epic;components;labels;fixVersionName
//! ```
//!
//! Any bad row fails the whole batch; nothing is returned for the rows that
//! did parse.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use jiraissue_core::IssueDefaults;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::consts::BATCH_COLUMNS;

const DELIMITER: char = ';';
const COMMENT: char = '#';
const QUOTE: char = '"';
use crate::models::IssueAttributes;

/// Errors that abort batch expansion before anything is submitted
#[derive(Debug, Error)]
pub enum BatchError {
  #[error("failed to open batch file {}", path.display())]
  Open {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read batch source")]
  Read(#[source] io::Error),

  #[error("malformed record on line {line}: expected {expected} fields, found {found}")]
  MalformedRecord { line: u64, expected: usize, found: usize },

  #[error("malformed record on line {line}: summary is empty")]
  EmptySummary { line: u64 },

  #[error("malformed record on line {line}: {message}")]
  Unparseable { line: u64, message: String },
}

impl From<csv::Error> for BatchError {
  fn from(err: csv::Error) -> Self {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
      csv::ErrorKind::Io(source) => BatchError::Read(source),
      _ => BatchError::Unparseable { line, message },
    }
  }
}

/// Expand a batch source into issue attributes, applying `defaults` to every
/// row. Output order matches row order.
#[instrument(level = "debug", skip_all)]
pub fn expand_batch<R: Read>(mut source: R, defaults: &IssueDefaults) -> Result<Vec<IssueAttributes>, BatchError> {
  let mut raw = String::new();
  source.read_to_string(&mut raw).map_err(BatchError::Read)?;
  let normalized = strip_space_before_quotes(&raw);

  let mut reader = ReaderBuilder::new()
    .delimiter(DELIMITER as u8)
    .comment(Some(COMMENT as u8))
    .has_headers(true)
    .flexible(true)
    .from_reader(normalized.as_bytes());

  let mut issues = Vec::new();
  for record in reader.records() {
    let record = record?;
    issues.push(parse_record(&record, defaults)?);
  }

  debug!("Expanded {} issue(s) from batch source", issues.len());
  Ok(issues)
}

/// Open `path` and expand it with [`expand_batch`].
pub fn expand_batch_file(path: &Path, defaults: &IssueDefaults) -> Result<Vec<IssueAttributes>, BatchError> {
  let file = File::open(path).map_err(|source| BatchError::Open {
    path: path.to_path_buf(),
    source,
  })?;
  expand_batch(file, defaults)
}

/// Drop blanks between a field boundary and an opening quote, so
/// `a; "b;c"` reads as a quoted field. Everything else is copied as-is and
/// line numbers are preserved.
fn strip_space_before_quotes(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  let mut line_start = true;
  let mut field_start = true;
  let mut in_quotes = false;
  let mut in_comment = false;

  while let Some(c) = chars.next() {
    if in_comment {
      out.push(c);
      if c == '\n' {
        in_comment = false;
        line_start = true;
        field_start = true;
      }
      continue;
    }

    if in_quotes {
      out.push(c);
      if c == QUOTE {
        if chars.peek() == Some(&QUOTE) {
          out.push(QUOTE);
          chars.next();
        } else {
          in_quotes = false;
        }
      }
      continue;
    }

    match c {
      COMMENT if line_start => in_comment = true,
      ' ' | '\t' if field_start => {
        let mut blanks = String::from(c);
        while let Some(&(next @ (' ' | '\t'))) = chars.peek() {
          blanks.push(next);
          chars.next();
        }
        if chars.peek() != Some(&QUOTE) {
          out.push_str(&blanks);
        }
        line_start = false;
        continue;
      }
      QUOTE if field_start => in_quotes = true,
      _ => {}
    }

    out.push(c);
    line_start = c == '\n';
    field_start = c == '\n' || c == DELIMITER;
  }

  out
}

fn parse_record(record: &StringRecord, defaults: &IssueDefaults) -> Result<IssueAttributes, BatchError> {
  let line = record.position().map_or(0, csv::Position::line);
  if record.len() < BATCH_COLUMNS {
    return Err(BatchError::MalformedRecord {
      line,
      expected: BATCH_COLUMNS,
      found: record.len(),
    });
  }

  let field = |index: usize| record.get(index).unwrap_or_default().trim();

  let summary = field(0);
  if summary.is_empty() {
    return Err(BatchError::EmptySummary { line });
  }

  let mut attrs = IssueAttributes::new(summary, defaults);
  attrs.description = optional(field(1));
  attrs.time_estimate = optional(field(2));
  attrs.epic = optional(field(3));
  attrs.components = split_cell(field(4));
  attrs.labels = split_cell(field(5));
  attrs.fix_version = optional(field(6));

  Ok(attrs)
}

fn optional(value: &str) -> Option<String> {
  (!value.is_empty()).then(|| value.to_string())
}

/// Split a comma-separated cell, trimming each value and dropping empties.
fn split_cell(cell: &str) -> Vec<String> {
  cell
    .split(',')
    .map(str::trim)
    .filter(|value| !value.is_empty())
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use jiraissue_test_utils::FixtureFile;

  use super::*;

  const HEADER: &str = "summary;description;time;epic;components;labels;fixVersionName\n";

  fn defaults() -> IssueDefaults {
    IssueDefaults::new("PROJ", "acc-1")
  }

  #[test]
  fn test_expand_single_row() {
    let input = format!("{HEADER}Fix login;Broken on mobile;3h;PROJ-10;backend,api;bug,urgent;v1.2\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.summary, "Fix login");
    assert_eq!(issue.description.as_deref(), Some("Broken on mobile"));
    assert_eq!(issue.time_estimate.as_deref(), Some("3h"));
    assert_eq!(issue.epic.as_deref(), Some("PROJ-10"));
    assert_eq!(issue.components, ["backend", "api"]);
    assert_eq!(issue.labels, ["bug", "urgent"]);
    assert_eq!(issue.fix_version.as_deref(), Some("v1.2"));
    assert_eq!(issue.project_key, "PROJ");
    assert_eq!(issue.assignee_id, "acc-1");
    assert_eq!(issue.issue_type, "Story");
    assert_eq!(issue.priority_id, "2");
  }

  #[test]
  fn test_expand_preserves_row_order() {
    let input = format!(
      "# issues for the sprint\n{HEADER}First;;;;;;\nSecond;;;;;;\n# a comment between rows\nThird;;;;;;\n"
    );

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();
    let summaries: Vec<&str> = issues.iter().map(|i| i.summary.as_str()).collect();

    assert_eq!(summaries, ["First", "Second", "Third"]);
  }

  #[test]
  fn test_header_is_skipped_unconditionally() {
    let input = "this;is;not;a;real;header\nOnly row;;;;;;\n";

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].summary, "Only row");
  }

  #[test]
  fn test_leading_whitespace_and_cell_values_are_trimmed() {
    let input = format!("{HEADER}  Spaced;  desc; 1d;  PROJ-2;  web ,  api ;ux,  a11y ;  v2\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();
    let issue = &issues[0];

    assert_eq!(issue.summary, "Spaced");
    assert_eq!(issue.description.as_deref(), Some("desc"));
    assert_eq!(issue.epic.as_deref(), Some("PROJ-2"));
    assert_eq!(issue.components, ["web", "api"]);
    assert_eq!(issue.labels, ["ux", "a11y"]);
    assert_eq!(issue.fix_version.as_deref(), Some("v2"));
  }

  #[test]
  fn test_empty_cells_yield_empty_values() {
    let input = format!("{HEADER}Bare;;;;;;\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();
    let issue = &issues[0];

    assert!(issue.description.is_none());
    assert!(issue.time_estimate.is_none());
    assert!(issue.epic.is_none());
    assert!(issue.components.is_empty());
    assert!(issue.labels.is_empty());
    assert!(issue.fix_version.is_none());
  }

  #[test]
  fn test_shared_defaults_apply_to_every_row() {
    let input = format!("{HEADER}A;;;;;;\nB;;;;;;\n");
    let shared = IssueDefaults {
      project_key: "OPS".into(),
      issue_type: "Task".into(),
      priority_id: "3".into(),
      assignee_id: "acc-9".into(),
    };

    let issues = expand_batch(input.as_bytes(), &shared).unwrap();

    for issue in &issues {
      assert_eq!(issue.project_key, "OPS");
      assert_eq!(issue.issue_type, "Task");
      assert_eq!(issue.priority_id, "3");
      assert_eq!(issue.assignee_id, "acc-9");
    }
  }

  #[test]
  fn test_short_row_fails_whole_batch() {
    let input = format!("{HEADER}Good;;;;;;\nToo short;desc;1h\nAlso good;;;;;;\n");

    let err = expand_batch(input.as_bytes(), &defaults()).unwrap_err();

    match err {
      BatchError::MalformedRecord { line, expected, found } => {
        assert_eq!(line, 3);
        assert_eq!(expected, 7);
        assert_eq!(found, 3);
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_empty_summary_is_malformed() {
    let input = format!("{HEADER}   ;desc;;;;;\n");

    let err = expand_batch(input.as_bytes(), &defaults()).unwrap_err();

    assert!(matches!(err, BatchError::EmptySummary { line: 2 }));
  }

  #[test]
  fn test_extra_fields_are_ignored() {
    let input = format!("{HEADER}Wide;d;;;;;v1;unexpected\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();

    assert_eq!(issues[0].fix_version.as_deref(), Some("v1"));
  }

  #[test]
  fn test_quoted_field_may_contain_delimiter() {
    let input = format!("{HEADER}\"Fix a;b parsing\";\"multi, part\";;;;;\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();

    assert_eq!(issues[0].summary, "Fix a;b parsing");
    assert_eq!(issues[0].description.as_deref(), Some("multi, part"));
  }

  #[test]
  fn test_space_before_quoted_field_keeps_columns() {
    let input = format!("{HEADER}Fix; \"a;b\";;;;;v1\n");

    let issues = expand_batch(input.as_bytes(), &defaults()).unwrap();

    assert_eq!(issues[0].summary, "Fix");
    assert_eq!(issues[0].description.as_deref(), Some("a;b"));
    assert_eq!(issues[0].fix_version.as_deref(), Some("v1"));
  }

  #[test]
  fn test_quoted_field_spanning_lines_keeps_line_numbers() {
    let input = format!("{HEADER}\t\"Two\nline\"; \"x; \"\"y\"\"\";;;;;\nShort;row\n");

    let err = expand_batch(input.as_bytes(), &defaults()).unwrap_err();

    assert!(matches!(err, BatchError::MalformedRecord { line: 4, found: 2, .. }));
  }

  #[test]
  fn test_strip_space_before_quotes() {
    assert_eq!(strip_space_before_quotes("a;  \"b;c\";d"), "a;\"b;c\";d");
    assert_eq!(strip_space_before_quotes("a;  b;\t\"c\""), "a;  b;\"c\"");
    assert_eq!(strip_space_before_quotes("a; b \"c\""), "a; b \"c\"");
    assert_eq!(strip_space_before_quotes("# note; \"x\n y; \"z\""), "# note; \"x\n y;\"z\"");
  }

  #[test]
  fn test_header_only_source_is_empty_batch() {
    let issues = expand_batch(HEADER.as_bytes(), &defaults()).unwrap();
    assert!(issues.is_empty());
  }

  #[test]
  fn test_expand_batch_file() {
    let fixture = FixtureFile::batch(&format!("{HEADER}One;;;;;;\nTwo;;;;;;\nThree;;;;;;\n"));

    let issues = expand_batch_file(fixture.path(), &defaults()).unwrap();

    assert_eq!(issues.len(), 3);
  }

  #[test]
  fn test_expand_batch_file_missing() {
    let fixture = FixtureFile::batch("");
    let missing = fixture.dir().join("missing.csv");

    let err = expand_batch_file(&missing, &defaults()).unwrap_err();

    assert!(matches!(err, BatchError::Open { .. }));
    assert!(err.to_string().contains("missing.csv"));
  }

  #[test]
  fn test_unreadable_source_is_read_error() {
    struct FailingReader;

    impl Read for FailingReader {
      fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
      }
    }

    let err = expand_batch(FailingReader, &defaults()).unwrap_err();

    assert!(matches!(err, BatchError::Read(_)));
  }
}
