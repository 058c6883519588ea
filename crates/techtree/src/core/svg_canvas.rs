//! SVG drawing backend
//!
//! Gradients are emitted once per brush into `<defs>` and referenced by id.
//! Each scene item becomes a `<g>` carrying its layer as `class` and its node
//! or connection ids as `data-*` attributes.

use svg::node::element::{
    Circle, Definitions, Group, Line, LinearGradient, Polygon, Polyline, RadialGradient,
    Rectangle, Stop, Text,
};
use svg::node::Text as SvgText;
use svg::{Document, Node};

use super::canvas::{Canvas, SceneItem, TextAnchor, TextStyle};
use super::types::{Brush, Color, Path, Point, Rect, Size, StrokeStyle};

/// Canvas that builds an SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    size: Size,
    defs: Definitions,
    root: Group,
    current: Option<Group>,
    gradient_count: usize,
}

impl SvgCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            defs: Definitions::new(),
            root: Group::new(),
            current: None,
            gradient_count: 0,
        }
    }

    /// Close any open item and serialize the document
    pub fn finish(mut self) -> String {
        self.close_item();
        Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", self.size.width)
            .set("height", self.size.height)
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width, self.size.height),
            )
            .add(self.defs)
            .add(self.root)
            .to_string()
    }

    fn push<T: Node>(&mut self, node: T) {
        match self.current.take() {
            Some(group) => self.current = Some(group.add(node)),
            None => {
                let root = std::mem::replace(&mut self.root, Group::new());
                self.root = root.add(node);
            }
        }
    }

    fn close_item(&mut self) {
        if let Some(group) = self.current.take() {
            let root = std::mem::replace(&mut self.root, Group::new());
            self.root = root.add(group);
        }
    }

    /// Resolve a brush to an SVG paint value and opacity, registering
    /// gradient definitions as needed
    fn paint(&mut self, brush: &Brush) -> (String, f64) {
        match brush {
            Brush::Solid(color) => (color.to_hex(), color.opacity()),
            Brush::LinearGradient { from, to, colors } => {
                let id = self.next_gradient_id();
                let gradient = add_stops(
                    LinearGradient::new()
                        .set("id", id.clone())
                        .set("gradientUnits", "userSpaceOnUse")
                        .set("x1", from.x)
                        .set("y1", from.y)
                        .set("x2", to.x)
                        .set("y2", to.y),
                    colors,
                );
                self.add_def(gradient);
                (format!("url(#{})", id), 1.0)
            }
            Brush::RadialGradient {
                center,
                radius,
                colors,
            } => {
                let id = self.next_gradient_id();
                let gradient = add_stops(
                    RadialGradient::new()
                        .set("id", id.clone())
                        .set("gradientUnits", "userSpaceOnUse")
                        .set("cx", center.x)
                        .set("cy", center.y)
                        .set("r", radius.max(0.0)),
                    colors,
                );
                self.add_def(gradient);
                (format!("url(#{})", id), 1.0)
            }
        }
    }

    fn next_gradient_id(&mut self) -> String {
        self.gradient_count += 1;
        format!("g{}", self.gradient_count)
    }

    fn add_def<T: Node>(&mut self, node: T) {
        let defs = std::mem::replace(&mut self.defs, Definitions::new());
        self.defs = defs.add(node);
    }
}

/// Spread color stops evenly from 0% to 100%
fn add_stops<T>(mut gradient: T, colors: &[Color]) -> T
where
    T: StopContainer,
{
    let last = colors.len().saturating_sub(1).max(1) as f64;
    for (i, color) in colors.iter().enumerate() {
        gradient = gradient.with_stop(
            Stop::new()
                .set("offset", format!("{}%", (i as f64 / last * 100.0).round()))
                .set("stop-color", color.to_hex())
                .set("stop-opacity", color.opacity()),
        );
    }
    gradient
}

trait StopContainer {
    fn with_stop(self, stop: Stop) -> Self;
}

impl StopContainer for LinearGradient {
    fn with_stop(self, stop: Stop) -> Self {
        self.add(stop)
    }
}

impl StopContainer for RadialGradient {
    fn with_stop(self, stop: Stop) -> Self {
        self.add(stop)
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Canvas for SvgCanvas {
    fn fill_circle(&mut self, center: Point, radius: f64, brush: Brush) {
        let (fill, opacity) = self.paint(&brush);
        self.push(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", radius.max(0.0))
                .set("fill", fill)
                .set("fill-opacity", opacity),
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: StrokeStyle) {
        let (paint, opacity) = self.paint(&stroke.brush);
        self.push(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", radius.max(0.0))
                .set("fill", "none")
                .set("stroke", paint)
                .set("stroke-opacity", opacity)
                .set("stroke-width", stroke.width),
        );
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        let (fill, opacity) = self.paint(&brush);
        self.push(
            Rectangle::new()
                .set("x", rect.origin.x)
                .set("y", rect.origin.y)
                .set("width", rect.size.width.max(0.0))
                .set("height", rect.size.height.max(0.0))
                .set("fill", fill)
                .set("fill-opacity", opacity),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: StrokeStyle) {
        let (paint, opacity) = self.paint(&stroke.brush);
        self.push(
            Rectangle::new()
                .set("x", rect.origin.x)
                .set("y", rect.origin.y)
                .set("width", rect.size.width.max(0.0))
                .set("height", rect.size.height.max(0.0))
                .set("fill", "none")
                .set("stroke", paint)
                .set("stroke-opacity", opacity)
                .set("stroke-width", stroke.width),
        );
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        if path.len() < 3 {
            return;
        }
        let (fill, opacity) = self.paint(&brush);
        self.push(
            Polygon::new()
                .set("points", points_attr(&path.points))
                .set("fill", fill)
                .set("fill-opacity", opacity),
        );
    }

    fn stroke_path(&mut self, path: &Path, stroke: StrokeStyle) {
        if path.len() < 2 {
            return;
        }
        let (paint, opacity) = self.paint(&stroke.brush);
        let points = points_attr(&path.points);
        if path.closed {
            self.push(
                Polygon::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", paint)
                    .set("stroke-opacity", opacity)
                    .set("stroke-width", stroke.width),
            );
        } else {
            self.push(
                Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", paint)
                    .set("stroke-opacity", opacity)
                    .set("stroke-width", stroke.width)
                    .set("stroke-linecap", stroke.cap.to_string()),
            );
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: StrokeStyle) {
        let (paint, opacity) = self.paint(&stroke.brush);
        self.push(
            Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y)
                .set("stroke", paint)
                .set("stroke-opacity", opacity)
                .set("stroke-width", stroke.width)
                .set("stroke-linecap", stroke.cap.to_string()),
        );
    }

    fn draw_text(&mut self, position: Point, text: &str, style: TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.push(
            Text::new("")
                .set("x", position.x)
                .set("y", position.y)
                .set("font-size", style.font_size)
                .set("font-family", "sans-serif")
                .set("text-anchor", anchor)
                .set("fill", style.color.to_hex())
                .set("fill-opacity", style.color.opacity())
                .add(SvgText::new(text)),
        );
    }

    fn begin_item(&mut self, item: SceneItem) {
        self.close_item();
        let group = Group::new().set("class", item.layer());
        let group = match &item {
            SceneItem::Grid => group,
            SceneItem::Connection { from, to } => {
                group.set("data-from", from.as_str()).set("data-to", to.as_str())
            }
            SceneItem::Node { id } | SceneItem::Label { id } => group.set("data-id", id.as_str()),
        };
        self.current = Some(group);
    }

    fn end_item(&mut self) {
        self.close_item();
    }
}
