//! Structural checks for loaded snapshots
//!
//! The renderer tolerates every issue reported here; these checks belong to
//! whoever loads and owns the tree (the CLI `validate` command, or
//! [`load_validated`]).

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use super::tree::TechnologyTree;
use crate::core::TreeError;

/// A structural problem in a tree snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// `requirements` names a node that does not exist
    DanglingRequirement { node: String, requirement: String },
    /// A connection endpoint does not exist
    DanglingConnection { from: String, to: String, missing: String },
    /// A connection from a node to itself
    SelfConnection { id: String },
    /// Requirements loop back on themselves; `path` starts and ends on the same id
    RequirementCycle { path: Vec<String> },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DanglingRequirement { node, requirement } => {
                write!(f, "node '{}' requires unknown node '{}'", node, requirement)
            }
            ValidationIssue::DanglingConnection { from, to, missing } => {
                write!(f, "connection {} -> {} references unknown node '{}'", from, to, missing)
            }
            ValidationIssue::SelfConnection { id } => {
                write!(f, "connection from '{}' to itself", id)
            }
            ValidationIssue::RequirementCycle { path } => {
                write!(f, "requirement cycle: {}", path.join(" -> "))
            }
        }
    }
}

/// Report every issue found, in a stable order: requirements, connections,
/// then cycles
pub fn validate(tree: &TechnologyTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for node in tree.nodes() {
        for requirement in &node.requirements {
            if !tree.has_node(requirement) {
                issues.push(ValidationIssue::DanglingRequirement {
                    node: node.id.clone(),
                    requirement: requirement.clone(),
                });
            }
        }
    }

    for connection in tree.connections() {
        let missing = [&connection.from, &connection.to]
            .into_iter()
            .find(|id| !tree.has_node(id));
        if let Some(missing) = missing {
            issues.push(ValidationIssue::DanglingConnection {
                from: connection.from.clone(),
                to: connection.to.clone(),
                missing: missing.clone(),
            });
        } else if connection.from == connection.to {
            issues.push(ValidationIssue::SelfConnection {
                id: connection.from.clone(),
            });
        }
    }

    issues.extend(find_requirement_cycles(tree));

    if issues.is_empty() {
        debug!(nodes = tree.node_count(), "Tree passed validation");
    } else {
        warn!(issues = issues.len(), "Tree has structural issues");
    }
    issues
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first search over requirement edges; one issue per back edge
///
/// Iterative, with an explicit frame stack: requirement chains can be far
/// deeper than the thread stack allows.
fn find_requirement_cycles(tree: &TechnologyTree) -> Vec<ValidationIssue> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut cycles = Vec::new();

    for root in tree.nodes() {
        if marks.contains_key(root.id.as_str()) {
            continue;
        }
        // (node id, index of the next requirement to follow)
        let mut frames: Vec<(&str, usize)> = vec![(root.id.as_str(), 0)];
        marks.insert(root.id.as_str(), Mark::Visiting);

        while let Some(frame) = frames.last_mut() {
            let (id, next) = *frame;
            let requirement = tree
                .node(id)
                .and_then(|node| node.requirements.get(next))
                .map(String::as_str);
            let Some(requirement) = requirement else {
                marks.insert(id, Mark::Done);
                frames.pop();
                continue;
            };
            frame.1 += 1;

            match marks.get(requirement).copied() {
                Some(Mark::Visiting) => {
                    let start = frames
                        .iter()
                        .position(|(s, _)| *s == requirement)
                        .unwrap_or(0);
                    let mut path: Vec<String> =
                        frames[start..].iter().map(|(s, _)| s.to_string()).collect();
                    path.push(requirement.to_string());
                    cycles.push(ValidationIssue::RequirementCycle { path });
                }
                Some(Mark::Done) => {}
                None if tree.has_node(requirement) => {
                    marks.insert(requirement, Mark::Visiting);
                    frames.push((requirement, 0));
                }
                None => {}
            }
        }
    }
    cycles
}

/// Parse a snapshot and reject it if validation reports anything
pub fn load_validated(json: &str) -> Result<TechnologyTree, TreeError> {
    let tree = TechnologyTree::from_json_str(json)?;
    let issues = validate(&tree);
    if issues.is_empty() {
        Ok(tree)
    } else {
        Err(TreeError::validation(issues))
    }
}
