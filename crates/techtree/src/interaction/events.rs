//! Requests emitted to whoever owns the tree state

use std::fmt;

use serde::Serialize;

use crate::core::Point;

/// Outward request from the canvas; the owner decides whether to apply it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TreeEvent {
    /// Select a node, or clear the selection with `None`
    NodeSelected { id: Option<String> },
    /// Move a node to a new world position
    NodeMoved { id: String, position: Point },
}

impl TreeEvent {
    pub fn selected(id: impl Into<String>) -> Self {
        TreeEvent::NodeSelected { id: Some(id.into()) }
    }

    pub fn selection_cleared() -> Self {
        TreeEvent::NodeSelected { id: None }
    }
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeEvent::NodeSelected { id: Some(id) } => write!(f, "select {}", id),
            TreeEvent::NodeSelected { id: None } => write!(f, "clear selection"),
            TreeEvent::NodeMoved { id, position } => write!(f, "move {} to {}", id, position),
        }
    }
}
