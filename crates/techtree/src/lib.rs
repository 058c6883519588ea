//! Techtree - Render learning technology trees onto a 2D canvas
//!
//! A library for drawing a snapshot of a technology tree (nodes, connections
//! and localized labels) through an abstract [`Canvas`](core::Canvas), and for
//! turning pointer gestures into selection and move requests.
//!
//! # Quick Start
//!
//! ```rust
//! use techtree::{render_svg, RenderConfig, ViewState};
//!
//! let json = r#"{"nodes": {"intro": {"position": {"x": 100, "y": 100},
//!                                    "title": {"en": "Intro"}}}}"#;
//! let svg = render_svg(json, &RenderConfig::default(), &ViewState::default()).unwrap();
//! assert!(svg.contains("Intro"));
//! ```
//!
//! # Advanced Usage
//!
//! Drive the renderer and gestures yourself:
//!
//! ```rust
//! use techtree::prelude::*;
//!
//! let json = r#"{"nodes": {"intro": {"position": {"x": 100, "y": 100}}}}"#;
//! let tree = TechnologyTree::from_json_str(json).unwrap();
//!
//! // Pick the node under a tap
//! let mut gestures = GestureController::new();
//! let events = gestures.tap(&tree, Point::new(110.0, 100.0));
//! assert_eq!(events, vec![TreeEvent::selected("intro")]);
//!
//! // Record the draw calls of one frame
//! let mut canvas = RecordingCanvas::new();
//! let view = ViewState::new().with_selected("intro");
//! let stats = TreeCanvas::new(RenderConfig::default()).render(&tree, &view, &mut canvas);
//! assert_eq!(stats.nodes_drawn, 1);
//! ```

pub mod core;
pub mod interaction;
pub mod model;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AnimationFrame, Brush, Canvas, Color, DrawCommand, Point, RecordingCanvas, Rect,
        RenderConfig, SceneItem, Size, SvgCanvas, TreeError, Vec2, ViewState,
    };
    pub use crate::interaction::{hit_test, Gesture, GestureController, TreeEvent};
    pub use crate::model::{
        validate, Connection, ConnectionKind, ConnectionStyle, LocalizedText, Metadata, Node,
        NodeShape, NodeType, TechnologyTree, ValidationIssue,
    };
    pub use crate::render::{RenderStats, TreeCanvas};
}

/// Parse a JSON tree snapshot
///
/// The snapshot is not validated; the renderer tolerates dangling
/// references. Use [`model::load_validated`] to reject them.
///
/// # Example
/// ```rust
/// let tree = techtree::load(r#"{"nodes": {}}"#).unwrap();
/// assert_eq!(tree.node_count(), 0);
/// ```
pub fn load(json: &str) -> anyhow::Result<model::TechnologyTree> {
    Ok(model::TechnologyTree::from_json_str(json)?)
}

/// Render a JSON tree snapshot to an SVG document
///
/// The document size is the configured viewport, or the tree's canvas size.
///
/// # Arguments
/// * `json` - Tree snapshot
/// * `config` - Static rendering options
/// * `view` - Pan offset, selection and animation frame
///
/// # Returns
/// * `Ok(String)` - The SVG document
/// * `Err` - If the snapshot cannot be parsed
pub fn render_svg(json: &str, config: &RenderConfig, view: &ViewState) -> anyhow::Result<String> {
    let tree = load(json)?;
    let renderer = render::TreeCanvas::new(config.clone());
    let mut canvas = SvgCanvas::new(renderer.viewport(&tree));
    renderer.render(&tree, view, &mut canvas);
    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": {
            "a": {"position": {"x": 10, "y": 10}, "title": {"en": "Alpha"}},
            "b": {"position": {"x": 90, "y": 10}, "requirements": ["a"], "title": {"ru": "Бета"}}
        },
        "connections": [{"from": "a", "to": "b"}],
        "metadata": {"canvasSize": {"width": 200, "height": 100}}
    }"#;

    #[test]
    fn test_render_svg() {
        let result = render_svg(SAMPLE, &RenderConfig::default(), &ViewState::default());
        assert!(result.is_ok(), "render failed: {:?}", result.err());
        let svg = result.unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("Бета"));
    }

    #[test]
    fn test_render_svg_rejects_bad_json() {
        assert!(render_svg("{", &RenderConfig::default(), &ViewState::default()).is_err());
    }

    #[test]
    fn test_load() {
        let tree = load(SAMPLE).unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.connection_count(), 1);
    }
}
