//! Fixed node palette
//!
//! Every gradient is exactly two stops: center color first, rim color second.

use crate::core::Color;
use crate::model::{Node, NodeType};

/// Two-stop gradient
pub type Gradient = [Color; 2];

pub const SELECTED_GRADIENT: Gradient = [Color::rgb(0xFF, 0x98, 0x00), Color::rgb(0xF5, 0x7C, 0x00)];
pub const ROOT_GRADIENT: Gradient = [Color::rgb(0x4C, 0xAF, 0x50), Color::rgb(0x2E, 0x7D, 0x32)];
pub const TOPIC_GRADIENT: Gradient = [Color::rgb(0x21, 0x96, 0xF3), Color::rgb(0x15, 0x65, 0xC0)];
pub const SKILL_GRADIENT: Gradient = [Color::rgb(0xFF, 0xC1, 0x07), Color::rgb(0xFF, 0x8F, 0x00)];
pub const MODULE_GRADIENT: Gradient = [Color::rgb(0xE9, 0x1E, 0x63), Color::rgb(0xAD, 0x14, 0x57)];
pub const ARTICLE_GRADIENT: Gradient = [Color::rgb(0x9C, 0x27, 0xB0), Color::rgb(0x6A, 0x1B, 0x9A)];

/// Outline of unselected nodes
pub const OUTLINE_COLOR: Color = Color::rgb(0x21, 0x21, 0x21);

/// Glow drawn under highlighted connections
pub const HIGHLIGHT_ACCENT: Color = Color::rgb(0x42, 0xA5, 0xF5);

/// Gradient for a node type, ignoring selection and root status
pub fn type_gradient(node_type: NodeType) -> Gradient {
    match node_type {
        NodeType::Topic => TOPIC_GRADIENT,
        NodeType::Skill => SKILL_GRADIENT,
        NodeType::Module => MODULE_GRADIENT,
        NodeType::Article => ARTICLE_GRADIENT,
    }
}

/// Fill gradient for a node: selected beats root, root beats type
pub fn color_gradient_for(node: &Node, selected: Option<&str>) -> Gradient {
    if selected == Some(node.id.as_str()) {
        SELECTED_GRADIENT
    } else if node.is_root() {
        ROOT_GRADIENT
    } else {
        type_gradient(node.node_type)
    }
}

/// Color a connection takes at this node's end
pub fn connection_color(node: &Node) -> Color {
    type_gradient(node.node_type)[0]
}
