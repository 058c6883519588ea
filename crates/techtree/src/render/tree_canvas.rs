//! Frame orchestration
//!
//! [`TreeCanvas::render`] paints one frame of a tree snapshot in fixed layer
//! order: background, grid, connections, nodes, labels. It never fails: a
//! connection whose endpoint is missing is skipped and counted.

use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::colors::{color_gradient_for, connection_color};
use super::connection::{ConnectionAppearance, ConnectionRenderer};
use super::grid::draw_grid;
use super::labels::LabelLayer;
use super::node::{NodeAppearance, NodeRenderer};
use crate::core::{Canvas, Point, Rect, RenderConfig, SceneItem, Size, ViewState};
use crate::model::{Node, TechnologyTree};

/// What a frame drew
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub grid_lines: usize,
    pub connections_drawn: usize,
    /// Connections with an endpoint missing from the snapshot
    pub connections_skipped: usize,
    pub nodes_drawn: usize,
    pub labels_drawn: usize,
}

/// Renders tree snapshots onto any [`Canvas`]
#[derive(Debug, Clone, Default)]
pub struct TreeCanvas {
    config: RenderConfig,
    nodes: NodeRenderer,
    connections: ConnectionRenderer,
}

impl TreeCanvas {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            nodes: NodeRenderer::new(),
            connections: ConnectionRenderer::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Output size for a tree: configured viewport, else the tree's canvas size
    pub fn viewport(&self, tree: &TechnologyTree) -> Size {
        self.config.viewport.unwrap_or(tree.metadata().canvas_size)
    }

    /// Label language for a tree: configured language, else the tree default
    pub fn language<'a>(&'a self, tree: &'a TechnologyTree) -> &'a str {
        self.config
            .language
            .as_deref()
            .unwrap_or(&tree.metadata().default_language)
    }

    /// Paint one frame
    pub fn render<C: Canvas + ?Sized>(
        &self,
        tree: &TechnologyTree,
        view: &ViewState,
        canvas: &mut C,
    ) -> RenderStats {
        let render_span = span!(
            Level::INFO,
            "render_tree",
            nodes = tree.node_count(),
            connections = tree.connection_count(),
            selected = view.selected.as_deref().unwrap_or("")
        );
        let _enter = render_span.enter();

        let mut stats = RenderStats::default();
        let viewport = self.viewport(tree);

        canvas.fill_rect(Rect::new(Point::ORIGIN, viewport), self.config.background.into());

        if self.config.show_grid {
            stats.grid_lines = draw_grid(
                canvas,
                viewport,
                self.config.grid_spacing,
                view.pan,
                self.config.background,
            );
        }

        for connection in tree.connections() {
            let Some((from, to)) = tree.endpoints(connection) else {
                trace!(from = %connection.from, to = %connection.to, "Skipping dangling connection");
                stats.connections_skipped += 1;
                continue;
            };
            let look = ConnectionAppearance {
                style: connection.style(),
                from_color: connection_color(from),
                to_color: connection_color(to),
                highlighted: view.is_selected(&from.id) || view.is_selected(&to.id),
            };
            canvas.begin_item(SceneItem::Connection {
                from: from.id.clone(),
                to: to.id.clone(),
            });
            self.connections
                .draw(canvas, from.position + view.pan, to.position + view.pan, &look);
            canvas.end_item();
            stats.connections_drawn += 1;
        }

        for node in tree.nodes() {
            canvas.begin_item(SceneItem::Node { id: node.id.clone() });
            self.nodes
                .draw(canvas, node.position + view.pan, &self.appearance(node, view));
            canvas.end_item();
            stats.nodes_drawn += 1;
        }

        let labels = LabelLayer::new(&self.config, self.language(tree));
        stats.labels_drawn = labels.draw(canvas, &labels.layout(tree, view));

        debug!(
            connections = stats.connections_drawn,
            skipped = stats.connections_skipped,
            nodes = stats.nodes_drawn,
            labels = stats.labels_drawn,
            "Frame rendered"
        );
        stats
    }

    fn appearance(&self, node: &Node, view: &ViewState) -> NodeAppearance {
        let selected = view.is_selected(&node.id);
        NodeAppearance {
            shape: node.shape(),
            gradient: color_gradient_for(node, view.selected.as_deref()),
            selected,
            scale: if selected {
                view.animation.pulse_scale
            } else {
                1.0
            },
            glow_alpha: view.animation.glow_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordingCanvas;
    use crate::model::{Connection, Metadata, NodeType};

    fn tree(connections: Vec<Connection>) -> TechnologyTree {
        TechnologyTree::new(
            vec![
                Node::new("a", NodeType::Topic, Point::new(0.0, 0.0)),
                Node::new("b", NodeType::Skill, Point::new(100.0, 0.0)).with_requirements(["a"]),
            ],
            connections,
            Metadata::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_dangling_connection_skipped() {
        let tree = tree(vec![Connection::new("a", "b"), Connection::new("a", "ghost")]);
        let mut canvas = RecordingCanvas::new();
        let stats = TreeCanvas::default().render(&tree, &ViewState::new(), &mut canvas);

        assert_eq!(stats.connections_drawn, 1);
        assert_eq!(stats.connections_skipped, 1);
        assert_eq!(stats.nodes_drawn, 2);
        assert_eq!(stats.labels_drawn, 2);
    }

    #[test]
    fn test_grid_only_when_enabled() {
        let tree = tree(vec![]);
        let mut canvas = RecordingCanvas::new();
        TreeCanvas::default().render(&tree, &ViewState::new(), &mut canvas);
        assert!(!canvas.items().contains(&&SceneItem::Grid));

        canvas.clear();
        let stats = TreeCanvas::new(RenderConfig::new().with_grid(true)).render(
            &tree,
            &ViewState::new(),
            &mut canvas,
        );
        assert_eq!(canvas.items()[0], &SceneItem::Grid);
        assert!(stats.grid_lines > 0);
    }

    #[test]
    fn test_viewport_and_language_fallbacks() {
        let tree = tree(vec![]);
        let canvas = TreeCanvas::default();
        assert_eq!(canvas.viewport(&tree), Size::default());
        assert_eq!(canvas.language(&tree), "ru");

        let configured = TreeCanvas::new(
            RenderConfig::new()
                .with_language("en")
                .with_viewport(Size::new(10.0, 10.0)),
        );
        assert_eq!(configured.viewport(&tree), Size::new(10.0, 10.0));
        assert_eq!(configured.language(&tree), "en");
    }
}
