//! Drawing surface abstraction shared by every layer renderer
//!
//! Renderers talk to a [`Canvas`]; backends decide what a call means.
//! [`RecordingCanvas`] keeps the calls as data, which is how draw order and
//! per-item call sequences are inspected in tests. [`crate::core::SvgCanvas`]
//! turns them into a document.

use std::fmt;

use super::types::{Brush, Color, Path, Point, Rect, StrokeStyle};

/// Logical scene element a run of draw calls belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneItem {
    Grid,
    Connection { from: String, to: String },
    Node { id: String },
    Label { id: String },
}

impl SceneItem {
    /// Short layer name, used for grouping in backends
    pub fn layer(&self) -> &'static str {
        match self {
            SceneItem::Grid => "grid",
            SceneItem::Connection { .. } => "connection",
            SceneItem::Node { .. } => "node",
            SceneItem::Label { .. } => "label",
        }
    }
}

impl fmt::Display for SceneItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneItem::Grid => write!(f, "grid"),
            SceneItem::Connection { from, to } => write!(f, "connection {}->{}", from, to),
            SceneItem::Node { id } => write!(f, "node {}", id),
            SceneItem::Label { id } => write!(f, "label {}", id),
        }
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

/// Text draw parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f64,
    pub anchor: TextAnchor,
}

/// Abstract 2D drawing API
///
/// All coordinates are screen coordinates; renderers apply the pan offset
/// before calling in.
pub trait Canvas {
    fn fill_circle(&mut self, center: Point, radius: f64, brush: Brush);

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: StrokeStyle);

    fn fill_rect(&mut self, rect: Rect, brush: Brush);

    fn stroke_rect(&mut self, rect: Rect, stroke: StrokeStyle);

    fn fill_path(&mut self, path: &Path, brush: Brush);

    fn stroke_path(&mut self, path: &Path, stroke: StrokeStyle);

    fn draw_line(&mut self, from: Point, to: Point, stroke: StrokeStyle);

    /// Draw text with its baseline anchored at `position`
    fn draw_text(&mut self, position: Point, text: &str, style: TextStyle);

    /// Mark the start of the calls belonging to `item`
    fn begin_item(&mut self, _item: SceneItem) {}

    /// Mark the end of the current item
    fn end_item(&mut self) {}
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginItem(SceneItem),
    EndItem,
    FillCircle {
        center: Point,
        radius: f64,
        brush: Brush,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: StrokeStyle,
    },
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    StrokeRect {
        rect: Rect,
        stroke: StrokeStyle,
    },
    FillPath {
        path: Path,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        stroke: StrokeStyle,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Text {
        position: Point,
        text: String,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// True for the item markers, false for actual drawing
    pub fn is_marker(&self) -> bool {
        matches!(self, DrawCommand::BeginItem(_) | DrawCommand::EndItem)
    }
}

/// Canvas that records calls instead of drawing
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, markers included, in call order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of actual draw calls (markers excluded)
    pub fn draw_call_count(&self) -> usize {
        self.commands.iter().filter(|c| !c.is_marker()).count()
    }

    /// Scene items in the order they were begun
    pub fn items(&self) -> Vec<&SceneItem> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BeginItem(item) => Some(item),
                _ => None,
            })
            .collect()
    }

    /// Draw calls recorded between `begin_item(item)` and its `end_item`,
    /// across every occurrence of that item
    pub fn commands_for(&self, item: &SceneItem) -> Vec<&DrawCommand> {
        let mut out = Vec::new();
        let mut depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::BeginItem(begun) if depth == 0 && begun == item => depth = 1,
                DrawCommand::BeginItem(_) if depth > 0 => depth += 1,
                DrawCommand::EndItem if depth > 0 => depth -= 1,
                c if depth > 0 => out.push(c),
                _ => {}
            }
        }
        out
    }

    /// Text of every `draw_text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_circle(&mut self, center: Point, radius: f64, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke,
        });
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.commands.push(DrawCommand::FillRect { rect, brush });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            brush,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn draw_text(&mut self, position: Point, text: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            style,
        });
    }

    fn begin_item(&mut self, item: SceneItem) {
        self.commands.push(DrawCommand::BeginItem(item));
    }

    fn end_item(&mut self) {
        self.commands.push(DrawCommand::EndItem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;

    #[test]
    fn test_recording_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_item(SceneItem::Node { id: "a".into() });
        canvas.fill_circle(Point::ORIGIN, 4.0, Color::BLACK.into());
        canvas.end_item();
        canvas.fill_rect(
            Rect::new(Point::ORIGIN, Size::new(1.0, 1.0)),
            Color::WHITE.into(),
        );

        assert_eq!(canvas.commands().len(), 4);
        assert_eq!(canvas.draw_call_count(), 2);
        assert_eq!(canvas.items(), vec![&SceneItem::Node { id: "a".into() }]);
    }

    #[test]
    fn test_commands_for_item() {
        let mut canvas = RecordingCanvas::new();
        let a = SceneItem::Label { id: "a".into() };
        let b = SceneItem::Label { id: "b".into() };
        let style = TextStyle {
            color: Color::BLACK,
            font_size: 12.0,
            anchor: TextAnchor::Middle,
        };
        canvas.begin_item(a.clone());
        canvas.draw_text(Point::ORIGIN, "first", style.clone());
        canvas.end_item();
        canvas.begin_item(b.clone());
        canvas.draw_text(Point::ORIGIN, "second", style);
        canvas.end_item();

        assert_eq!(canvas.commands_for(&a).len(), 1);
        assert_eq!(canvas.texts(), vec!["first", "second"]);
        assert!(canvas
            .commands_for(&SceneItem::Grid)
            .is_empty());
    }
}
