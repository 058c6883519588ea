//! Node drawing
//!
//! Every shape is drawn in the same five passes: drop shadow, selection glow
//! (selected only), radial gradient body, specular highlight, outline.

use tracing::trace;

use super::colors::{Gradient, OUTLINE_COLOR};
use super::geometry::{hexagon_path, top_hexagon_sliver};
use crate::core::{Brush, Canvas, Color, Point, Rect, Size, StrokeStyle, Vec2};
use crate::model::NodeShape;

pub const CIRCLE_RADIUS: f64 = 32.0;
pub const HEXAGON_RADIUS: f64 = 35.0;
pub const SQUARE_SIZE: f64 = 60.0;

pub const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);
pub const SHADOW_ALPHA: f64 = 0.5;

const OUTLINE_WIDTH: f64 = 2.5;
const SELECTED_OUTLINE_WIDTH: f64 = 3.0;

/// Nominal size of a shape before scaling: radius for circles and hexagons,
/// side length for squares
pub fn nominal_size(shape: NodeShape) -> f64 {
    match shape {
        NodeShape::Circle => CIRCLE_RADIUS,
        NodeShape::Hexagon => HEXAGON_RADIUS,
        NodeShape::Square => SQUARE_SIZE,
    }
}

/// Distance from a node's center to the bottom of its shape
pub fn half_height(shape: NodeShape) -> f64 {
    match shape {
        NodeShape::Circle => CIRCLE_RADIUS,
        NodeShape::Hexagon => HEXAGON_RADIUS,
        NodeShape::Square => SQUARE_SIZE / 2.0,
    }
}

/// Per-node drawing inputs resolved by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAppearance {
    pub shape: NodeShape,
    pub gradient: Gradient,
    pub selected: bool,
    /// Multiplies the nominal size; the pulse scale for the selected node
    pub scale: f64,
    pub glow_alpha: f64,
}

impl NodeAppearance {
    fn shadow(&self) -> Brush {
        Color::BLACK.with_alpha(SHADOW_ALPHA).into()
    }

    fn glow(&self) -> Brush {
        self.gradient[0].with_alpha(self.glow_alpha).into()
    }

    fn body(&self, center: Point) -> Brush {
        Brush::RadialGradient {
            center,
            radius: nominal_size(self.shape) * self.scale,
            colors: self.gradient.to_vec(),
        }
    }

    fn outline(&self) -> StrokeStyle {
        if self.selected {
            StrokeStyle::new(Color::WHITE, SELECTED_OUTLINE_WIDTH)
        } else {
            StrokeStyle::new(OUTLINE_COLOR, OUTLINE_WIDTH)
        }
    }
}

/// Draws one node at a screen position
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeRenderer;

impl NodeRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point, look: &NodeAppearance) {
        trace!(shape = %look.shape, x = center.x, y = center.y, "Drawing node");
        match look.shape {
            NodeShape::Circle => self.draw_circle(canvas, center, look),
            NodeShape::Hexagon => self.draw_hexagon(canvas, center, look),
            NodeShape::Square => self.draw_square(canvas, center, look),
        }
    }

    fn draw_circle<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point, look: &NodeAppearance) {
        let radius = CIRCLE_RADIUS * look.scale;

        canvas.fill_circle(center + SHADOW_OFFSET, radius, look.shadow());
        if look.selected {
            canvas.fill_circle(center, radius * 1.5, look.glow());
        }
        canvas.fill_circle(center, radius, look.body(center));
        canvas.fill_circle(
            center + Vec2::new(-radius * 0.3, -radius * 0.3),
            radius * 0.4,
            Color::WHITE.with_alpha(0.3).into(),
        );
        canvas.stroke_circle(center, radius, look.outline());
    }

    fn draw_hexagon<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point, look: &NodeAppearance) {
        let radius = HEXAGON_RADIUS * look.scale;
        let body = hexagon_path(center, radius);

        canvas.fill_path(&hexagon_path(center + SHADOW_OFFSET, radius), look.shadow());
        if look.selected {
            canvas.fill_path(&hexagon_path(center, radius + 5.0), look.glow());
        }
        canvas.fill_path(&body, look.body(center));
        canvas.fill_path(
            &top_hexagon_sliver(center, radius),
            Color::WHITE.with_alpha(0.2).into(),
        );
        canvas.stroke_path(&body, look.outline());
    }

    fn draw_square<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point, look: &NodeAppearance) {
        let side = SQUARE_SIZE * look.scale;
        let body = Rect::centered(center, Size::new(side, side));

        canvas.fill_rect(
            Rect::centered(center + SHADOW_OFFSET, Size::new(side, side)),
            look.shadow(),
        );
        if look.selected {
            let glow = side + 10.0;
            canvas.fill_rect(Rect::centered(center, Size::new(glow, glow)), look.glow());
        }
        canvas.fill_rect(body, look.body(center));
        canvas.fill_rect(
            Rect::new(body.origin, Size::new(side, side / 2.0)),
            Color::WHITE.with_alpha(0.2).into(),
        );
        canvas.stroke_rect(body, look.outline());
    }
}
