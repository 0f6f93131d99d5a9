//! # Output Formatting
//!
//! Colored, emoji-prefixed terminal messages. The per-issue lines produced
//! here are scraped by scripts, so their wording must stay stable.

use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode to the global color override.
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave owo-colors to detect the terminal
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Style `text` only when `stream` supports color (or colors are forced).
fn styled(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", styled(&check, Stream::Stdout, Style::new().green().bold()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", styled(&cross, Stream::Stderr, Style::new().red().bold()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!("{} {}", styled(&warning, Stream::Stderr, Style::new().yellow().bold()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", styled(&info, Stream::Stdout, Style::new().blue().bold()), message);
}

/// Line reported for an issue that was created.
pub fn issue_created_message(link: &str) -> String {
  format!("Issue created. Link to issue {link}")
}

/// Line reported for an issue that could not be created.
pub fn issue_failed_message(summary: &str, error: &str) -> String {
  format!("Failed to create issue '{summary}': {error}")
}

/// Closing line of a batch run.
pub fn batch_summary_message(created: usize, total: usize, failed: usize) -> String {
  let noun = if total == 1 { "issue" } else { "issues" };
  if failed == 0 {
    format!("{created} of {total} {noun} created")
  } else {
    format!("{created} of {total} {noun} created, {failed} failed")
  }
}
