//! # Command Line Interface
//!
//! A single entry point for both modes: one issue described by flags, or a
//! batch file with `--file`. Configuration is resolved once here and passed
//! down explicitly.

mod create;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser};
use jiraissue_core::output::ColorMode;
use jiraissue_core::{ConfigOverrides, JiraIssueConfig, print_warning};

/// Top-level CLI command for the jiraissue tool
#[derive(Parser)]
#[command(name = "jiraissue")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Create Jira issues from the command line")]
#[command(
  long_about = "Creates Jira issues, either a single issue described by flags or a batch\n\
        read from a semicolon-delimited file.\n\n\
        Settings come from the config file, then JIRA_* environment variables,\n\
        then flags. JIRA_PROJECT_KEY and JIRA_API_TOKEN are required."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Dump every request and response to stderr
  #[arg(long)]
  pub debug: bool,

  /// Build and show requests without creating anything
  #[arg(long)]
  pub dry_run: bool,

  /// Config file to use instead of the default location
  #[arg(long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Semicolon-delimited batch file with one issue per row
  #[arg(
    short = 'f',
    long = "file",
    value_name = "PATH",
    conflicts_with = "summary",
    required_unless_present = "summary",
    long_help = "Semicolon-delimited batch file with one issue per row.\n\n\
             Lines starting with '#' are comments and the first row is a header.\n\
             Columns: summary;description;time;epic;components;labels;fixVersionName\n\
             Components and labels are comma-separated."
  )]
  pub file: Option<PathBuf>,

  /// Jira project key (overrides JIRA_PROJECT_KEY)
  #[arg(long, value_name = "KEY")]
  pub project: Option<String>,

  /// Assignee account id (overrides JIRA_ASSIGNEE_ID)
  #[arg(long, value_name = "ID")]
  pub assignee: Option<String>,

  /// Issue type name, "Story" by default
  #[arg(long, value_name = "NAME")]
  pub issue_type: Option<String>,

  /// Priority id, "2" by default
  #[arg(long, value_name = "ID")]
  pub priority: Option<String>,

  #[command(flatten)]
  pub issue: IssueArgs,
}

/// Flags describing a single issue
#[derive(Args, Debug, Default)]
pub struct IssueArgs {
  /// Summary of the issue
  #[arg(short = 's', long)]
  pub summary: Option<String>,

  /// Description of the issue
  #[arg(short = 'd', long, conflicts_with = "file")]
  pub description: Option<String>,

  /// Time estimation
  #[arg(short = 't', long = "time", conflicts_with = "file")]
  pub time_estimate: Option<String>,

  /// Epic key to link the issue under
  #[arg(short = 'e', long, conflicts_with = "file")]
  pub epic: Option<String>,

  /// Component name (repeatable or comma-separated)
  #[arg(short = 'c', long = "component", value_delimiter = ',', action = ArgAction::Append, conflicts_with = "file")]
  pub components: Vec<String>,

  /// Label (repeatable or comma-separated)
  #[arg(short = 'l', long = "label", value_delimiter = ',', action = ArgAction::Append, conflicts_with = "file")]
  pub labels: Vec<String>,

  /// Fix version name
  #[arg(long, conflicts_with = "file")]
  pub fix_version: Option<String>,
}

pub fn handle_cli(cli: Cli) -> Result<ExitCode> {
  cli.colors.apply();

  let overrides = ConfigOverrides {
    project_key: cli.project.clone(),
    assignee_id: cli.assignee.clone(),
    issue_type: cli.issue_type.clone(),
    priority_id: cli.priority.clone(),
    debug: cli.debug,
    dry_run: cli.dry_run,
  };
  let config =
    JiraIssueConfig::from_environment(cli.config.as_deref(), &overrides).context("Invalid configuration")?;

  let issues = create::collect_issues(&cli.issue, cli.file.as_deref(), &config.defaults)?;
  if issues.is_empty() {
    print_warning("No issues to create");
    return Ok(ExitCode::SUCCESS);
  }

  create::submit_issues(&config, issues)
}
