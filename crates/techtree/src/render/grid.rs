//! Background grid

use crate::core::{Canvas, Color, Point, SceneItem, Size, StrokeStyle, Vec2};

/// Grid lines are the background color darkened by this factor
const GRID_BRIGHTNESS: f64 = 0.92;
const GRID_LINE_WIDTH: f64 = 1.0;

/// Smaller spacings are drawn at this spacing
pub const MIN_GRID_SPACING: f64 = 1.0;
/// Upper bound on lines per axis, for very large viewports
pub const MAX_LINES_PER_AXIS: usize = 4096;

/// Offsets of the lines along one axis of length `extent`
fn line_offsets(extent: f64, spacing: f64, pan: f64) -> impl Iterator<Item = f64> {
    let start = if pan.is_finite() { pan.rem_euclid(spacing) } else { 0.0 };
    let count = if start <= extent {
        (((extent - start) / spacing).floor() as usize).saturating_add(1)
    } else {
        0
    };
    (0..count.min(MAX_LINES_PER_AXIS)).map(move |i| start + i as f64 * spacing)
}

/// Draw grid lines every `spacing` pixels, shifted with the pan so the grid
/// scrolls with the tree. Returns the number of lines drawn.
pub fn draw_grid<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: Size,
    spacing: f64,
    pan: Vec2,
    background: Color,
) -> usize {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(spacing) || !usable(viewport.width) || !usable(viewport.height) {
        return 0;
    }
    let spacing = spacing.max(MIN_GRID_SPACING);
    let stroke = StrokeStyle::new(background.adjust_brightness(GRID_BRIGHTNESS), GRID_LINE_WIDTH);
    let mut lines = 0;

    canvas.begin_item(SceneItem::Grid);
    for x in line_offsets(viewport.width, spacing, pan.dx) {
        canvas.draw_line(Point::new(x, 0.0), Point::new(x, viewport.height), stroke.clone());
        lines += 1;
    }
    for y in line_offsets(viewport.height, spacing, pan.dy) {
        canvas.draw_line(Point::new(0.0, y), Point::new(viewport.width, y), stroke.clone());
        lines += 1;
    }
    canvas.end_item();
    lines
}
