//! Shape and stroke geometry
//!
//! Screen space is y-down, so vertex 0 of a hexagon (angle −π/2) is the top.

use std::f64::consts::{PI, TAU};

use crate::core::{Path, Point, Vec2};

/// Vertex `i` of a regular hexagon
fn hexagon_vertex(center: Point, radius: f64, i: usize) -> Point {
    let angle = TAU * i as f64 / 6.0 - PI / 2.0;
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Closed 6-vertex hexagon path
pub fn hexagon_path(center: Point, radius: f64) -> Path {
    Path::closed((0..6).map(|i| hexagon_vertex(center, radius, i)).collect())
}

/// First three hexagon vertices plus the center, closed. Highlight only.
pub fn top_hexagon_sliver(center: Point, radius: f64) -> Path {
    let mut points: Vec<Point> = (0..3).map(|i| hexagon_vertex(center, radius, i)).collect();
    points.push(center);
    Path::closed(points)
}

/// Point `by` units before `to` along the segment `from`→`to`
pub fn truncate_end(from: Point, to: Point, by: f64) -> Point {
    to - (to - from).normalized() * by
}

/// Filled arrowhead triangle: tip plus two back vertices rotated ±30°
/// around the line angle, `size` back from the tip
pub fn arrowhead(tip: Point, angle: f64, size: f64) -> Path {
    let back = |theta: f64| Point::new(tip.x - size * theta.cos(), tip.y - size * theta.sin());
    Path::closed(vec![tip, back(angle - PI / 6.0), back(angle + PI / 6.0)])
}

/// Upper bound on dashes per segment; longer lines are dashed from the
/// source end only
pub const MAX_DASHES: usize = 4096;

/// Split `from`→`to` into `floor(len / (dash + gap))` dashes, at most
/// [`MAX_DASHES`]. Non-finite lengths yield no dashes.
pub fn dash_segments(from: Point, to: Point, dash: f64, gap: f64) -> Vec<(Point, Point)> {
    let delta: Vec2 = to - from;
    let length = delta.length();
    let period = dash + gap;
    if !length.is_finite() || !period.is_finite() || period <= 0.0 {
        return Vec::new();
    }
    let count = ((length / period).floor() as usize).min(MAX_DASHES);
    let dir = delta.normalized();
    (0..count)
        .map(|i| {
            let start = from + dir * (i as f64 * period);
            (start, start + dir * dash)
        })
        .collect()
}
