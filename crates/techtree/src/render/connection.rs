//! Connection drawing
//!
//! Lines run center to center and are painted with a linear gradient from the
//! source node's color to the destination's. Nodes are drawn afterwards, so
//! the ends disappear under them.

use tracing::trace;

use super::colors::HIGHLIGHT_ACCENT;
use super::geometry::{arrowhead, dash_segments, truncate_end};
use crate::core::{Brush, Canvas, Color, LineCap, Point, StrokeStyle};
use crate::model::ConnectionStyle;

pub const ARROW_SIZE: f64 = 12.0;
/// How far before the destination center the arrow tip stops
pub const ARROW_INSET: f64 = 35.0;
pub const ARROW_LINE_WIDTH: f64 = 3.0;

pub const DASH_LENGTH: f64 = 10.0;
pub const DASH_GAP: f64 = 5.0;

pub const SIMPLE_LINE_WIDTH: f64 = 2.5;

/// Per-connection drawing inputs
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionAppearance {
    pub style: ConnectionStyle,
    pub from_color: Color,
    pub to_color: Color,
    /// One endpoint is selected
    pub highlighted: bool,
}

impl ConnectionAppearance {
    fn brush(&self, from: Point, to: Point) -> Brush {
        Brush::LinearGradient {
            from,
            to,
            colors: vec![self.from_color, self.to_color],
        }
    }
}

fn glow(width: f64, alpha: f64) -> StrokeStyle {
    StrokeStyle::new(HIGHLIGHT_ACCENT.with_alpha(alpha), width).with_cap(LineCap::Round)
}

/// Draws one connection between two screen positions
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectionRenderer;

impl ConnectionRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        from: Point,
        to: Point,
        look: &ConnectionAppearance,
    ) {
        trace!(style = %look.style, highlighted = look.highlighted, "Drawing connection");
        // Spans that overflow f64 have no direction to dash or point along
        let style = if (to - from).length().is_finite() {
            look.style
        } else {
            ConnectionStyle::Simple
        };
        match style {
            ConnectionStyle::SolidArrow => self.draw_solid_arrow(canvas, from, to, look),
            ConnectionStyle::DashedLine => self.draw_dashed(canvas, from, to, look),
            ConnectionStyle::Simple => self.draw_simple(canvas, from, to, look),
        }
    }

    fn draw_solid_arrow<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        from: Point,
        to: Point,
        look: &ConnectionAppearance,
    ) {
        // Never pull the tip back past the source
        let tip = truncate_end(from, to, ARROW_INSET.min((to - from).length()));
        let angle = (to - from).angle();

        if look.highlighted {
            canvas.draw_line(from, tip, glow(8.0, 0.5));
        }
        canvas.draw_line(
            from,
            tip,
            StrokeStyle::new(look.brush(from, to), ARROW_LINE_WIDTH).with_cap(LineCap::Round),
        );
        canvas.fill_path(&arrowhead(tip, angle, ARROW_SIZE), look.to_color.into());
    }

    fn draw_dashed<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        from: Point,
        to: Point,
        look: &ConnectionAppearance,
    ) {
        if look.highlighted {
            canvas.draw_line(from, to, glow(6.0, 0.4));
        }
        for (start, end) in dash_segments(from, to, DASH_LENGTH, DASH_GAP) {
            canvas.draw_line(
                start,
                end,
                StrokeStyle::new(look.brush(from, to), SIMPLE_LINE_WIDTH),
            );
        }
    }

    fn draw_simple<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        from: Point,
        to: Point,
        look: &ConnectionAppearance,
    ) {
        if look.highlighted {
            canvas.draw_line(from, to, glow(6.0, 0.6));
        }
        canvas.draw_line(
            from,
            to,
            StrokeStyle::new(look.brush(from, to), SIMPLE_LINE_WIDTH),
        );
    }
}
