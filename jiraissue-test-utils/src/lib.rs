//! Test utilities shared across the jiraissue workspace
//!
//! This crate provides common testing infrastructure including:
//! - Scoped environment variable overrides ([`EnvVarGuard`])
//! - Temporary batch and config files ([`FixtureFile`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod file;

pub use env::{EnvVarGuard, JIRA_ENV_VARS};
pub use file::FixtureFile;
