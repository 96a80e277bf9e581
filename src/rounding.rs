//! Control geometry for drawing polygons with rounded corners.
//!
//! Nothing is drawn here: a renderer connects `start -> curve through corner -> end`
//! for every corner in sequence, e.g. with [`RoundedCorner::cubic_controls`].

use crate::config::RoundingConfig;
use crate::geometry::{Point, Tolerance};

/// One rounded corner: the curve runs from `start` to `end`, bending towards `corner`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedCorner {
    /// Point on the incoming edge, `radius` away from the corner.
    pub start: Point,
    pub corner: Point,
    /// Point on the outgoing edge, `radius` away from the corner.
    pub end: Point,
    pub radius: f64,
}

impl RoundedCorner {
    /// A corner that is not rounded at all.
    pub fn sharp(corner: Point) -> Self {
        Self { start: corner, corner, end: corner, radius: 0.0 }
    }

    /// Cubic bezier `[p0, c1, c2, p3]` with both control points on the corner.
    pub fn cubic_controls(&self) -> [Point; 4] {
        [self.start, self.corner, self.corner, self.end]
    }
}

/// Drops a duplicated closing vertex from a ring.
pub fn strip_closing_vertex<'a>(ring: &'a [Point], tol: &Tolerance) -> &'a [Point] {
    match ring {
        [first, .., last] if tol.points_close(first, last) => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Computes the rounding geometry of every corner of a closed polygon.
///
/// Each corner is rounded with `min(max_distance, half the incoming edge, half the
/// outgoing edge)`, so curves of neighbouring corners never overlap. Returns `None` for
/// polygons with fewer than three vertices.
pub fn round_corners(polygon: &[Point], max_distance: f64) -> Option<Vec<RoundedCorner>> {
    let n = polygon.len();
    if n < 3 {
        return None;
    }
    let max_distance = max_distance.max(0.0);

    let corners = (0..n)
        .map(|i| {
            let prev = polygon[(i + n - 1) % n];
            let corner = polygon[i];
            let next = polygon[(i + 1) % n];

            let (to_prev, prev_len) = unit(&corner, &prev);
            let (to_next, next_len) = unit(&corner, &next);
            let radius = max_distance.min(prev_len * 0.5).min(next_len * 0.5);

            RoundedCorner {
                start: [corner[0] + to_prev[0] * radius, corner[1] + to_prev[1] * radius],
                corner,
                end: [corner[0] + to_next[0] * radius, corner[1] + to_next[1] * radius],
                radius,
            }
        })
        .collect();
    Some(corners)
}

/// Unit vector from `from` towards `to` and the distance between them.
fn unit(from: &Point, to: &Point) -> ([f64; 2], f64) {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let len = (dx * dx + dy * dy).sqrt();
    if len > 0.0 { ([dx / len, dy / len], len) } else { ([0.0, 0.0], 0.0) }
}

impl RoundingConfig {
    /// Rounds `polygon` with these settings; sharp corners when rounding is disabled.
    pub fn apply(&self, polygon: &[Point]) -> Option<Vec<RoundedCorner>> {
        let distance = self.effective_distance();
        if distance > 0.0 {
            round_corners(polygon, distance)
        } else if polygon.len() >= 3 {
            Some(polygon.iter().copied().map(RoundedCorner::sharp).collect())
        } else {
            None
        }
    }
}
