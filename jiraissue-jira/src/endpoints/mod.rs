//! # Jira API Endpoints
//!
//! Endpoint implementations on [`crate::JiraClient`]. Only issue creation is
//! supported.

pub mod issues;
