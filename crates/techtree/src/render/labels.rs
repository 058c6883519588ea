//! Node title labels
//!
//! Labels sit centered under their node and are drawn after every node so no
//! shape covers them. Text width is estimated from terminal display columns,
//! which keeps CJK and Cyrillic titles proportionate without font metrics.

use unicode_width::UnicodeWidthStr;

use super::node::half_height;
use crate::core::{Canvas, Point, Rect, RenderConfig, SceneItem, Size, TextAnchor, TextStyle, ViewState};
use crate::model::{Node, TechnologyTree};

/// Average glyph advance as a fraction of the font size
const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A placed label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    pub node_id: String,
    pub text: String,
    /// Baseline center of the text
    pub anchor: Point,
    /// Estimated extent of the text
    pub bounds: Rect,
}

/// Estimated rendered size of a label
pub fn measure(text: &str, font_size: f64) -> Size {
    Size::new(
        text.width() as f64 * CHAR_WIDTH_FACTOR * font_size,
        LINE_HEIGHT_FACTOR * font_size,
    )
}

/// Places and draws labels for every node
#[derive(Debug, Clone)]
pub struct LabelLayer<'a> {
    config: &'a RenderConfig,
    language: &'a str,
}

impl<'a> LabelLayer<'a> {
    pub fn new(config: &'a RenderConfig, language: &'a str) -> Self {
        Self { config, language }
    }

    /// Label for one node; the selected node's label moves with its pulse
    pub fn place(&self, node: &Node, view: &ViewState) -> LabelBox {
        let scale = if view.is_selected(&node.id) {
            view.animation.pulse_scale
        } else {
            1.0
        };
        let center = node.position + view.pan;
        let text = node.title.resolve(self.language).to_string();
        let size = measure(&text, self.config.label_font_size);
        let top = center.y + half_height(node.shape()) * scale + self.config.label_offset;

        LabelBox {
            node_id: node.id.clone(),
            anchor: Point::new(center.x, top + self.config.label_font_size),
            bounds: Rect::new(Point::new(center.x - size.width / 2.0, top), size),
            text,
        }
    }

    /// Labels for every node, in document order
    pub fn layout(&self, tree: &TechnologyTree, view: &ViewState) -> Vec<LabelBox> {
        tree.nodes().iter().map(|node| self.place(node, view)).collect()
    }

    /// Draw placed labels; returns how many were drawn
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, labels: &[LabelBox]) -> usize {
        let style = TextStyle {
            color: self.config.label_color,
            font_size: self.config.label_font_size,
            anchor: TextAnchor::Middle,
        };
        for label in labels {
            canvas.begin_item(SceneItem::Label {
                id: label.node_id.clone(),
            });
            canvas.draw_text(label.anchor, &label.text, style.clone());
            canvas.end_item();
        }
        labels.len()
    }
}
