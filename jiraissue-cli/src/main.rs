//! # jiraissue Entry Point
//!
//! Creates Jira issues from command-line flags or from a semicolon-delimited
//! batch file.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::handle_cli;
use tracing::{Level, debug};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

/// Enables the request and response dumps of `--debug`.
const DEBUG_DUMP_DIRECTIVE: &str = "jiraissue_jira=debug";

fn main() -> Result<ExitCode> {
  let cmd = cli::Cli::parse();

  let level = level_for(cmd.verbose);
  let filter = log_filter(level, cmd.debug)?;

  // Diagnostics go to stderr; stdout is reserved for issue links
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();

  debug!("Tracing initialized with level: {}", level);

  handle_cli(cmd)
}

fn level_for(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  }
}

fn log_filter(level: Level, debug: bool) -> Result<EnvFilter> {
  let mut filter = EnvFilter::from_default_env().add_directive(level.into());
  // --debug only needs the client crate at debug level for the dumps
  if debug && level < Level::DEBUG {
    filter = filter.add_directive(DEBUG_DUMP_DIRECTIVE.parse()?);
  }
  Ok(filter)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_for_verbosity() {
    assert_eq!(level_for(0), Level::WARN);
    assert_eq!(level_for(1), Level::INFO);
    assert_eq!(level_for(2), Level::DEBUG);
    assert_eq!(level_for(5), Level::TRACE);
  }

  #[test]
  fn test_debug_scopes_dumps_to_client_crate() -> Result<()> {
    let filter = log_filter(Level::WARN, true)?.to_string();
    assert!(filter.contains("jiraissue_jira"));

    assert!(!log_filter(Level::WARN, false)?.to_string().contains("jiraissue_jira"));
    assert!(!log_filter(Level::TRACE, true)?.to_string().contains("jiraissue_jira"));

    Ok(())
  }
}
