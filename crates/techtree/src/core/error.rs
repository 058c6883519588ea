//! Core error types for tree loading and output
//!
//! Only the outer surface is fallible: reading snapshots, validating them on
//! request, and writing rendered output. Drawing and hit-testing never fail.

use thiserror::Error;

use crate::model::ValidationIssue;

/// Errors raised while loading, validating or emitting a technology tree
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Invalid tree: {message}")]
    InvalidTree { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Validation failed with {} issue(s): {}", .issues.len(), summarize(.issues))]
    Validation { issues: Vec<ValidationIssue> },
}

impl TreeError {
    /// Create a new invalid-tree error
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a validation error from a non-empty issue list
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation { issues }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
