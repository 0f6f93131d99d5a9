//! Temporary fixture files
//!
//! Batch files and config files are written into a fresh temporary directory
//! that is removed when the fixture is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a temporary file with fixed content
pub struct FixtureFile {
  temp_dir: TempDir,
  path: PathBuf,
}

impl FixtureFile {
  /// Write `content` to `file_name` inside a new temporary directory
  pub fn new(file_name: &str, content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write fixture file");

    Self { temp_dir, path }
  }

  /// Convenience constructor for a semicolon-delimited batch file
  pub fn batch(content: &str) -> Self {
    Self::new("issues.csv", content)
  }

  /// Path to the fixture file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Directory holding the fixture file
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
