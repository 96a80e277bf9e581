//! Numeric primitives for 2D points and implicit lines.
//!
//! Every comparison between coordinates goes through a [`Tolerance`], whose epsilon is
//! scaled by the magnitude of the compared values.

use serde::{Deserialize, Serialize};

use crate::error::{VoronoiError, VoronoiResult};

/// A point in the plane.
pub type Point = [f64; 2];

/// Default comparison epsilon, 2^-23.
pub const DEFAULT_EPSILON: f64 = 1.0 / 8_388_608.0;

/// Relative tolerance used for every approximate comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }
}

impl Tolerance {
    pub fn new(epsilon: f64) -> VoronoiResult<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(VoronoiError::InvalidTolerance { epsilon });
        }
        Ok(Self { epsilon })
    }

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        is_close(a, b, self.epsilon)
    }

    pub fn points_close(&self, p: &Point, q: &Point) -> bool {
        self.is_close(p[0], q[0]) && self.is_close(p[1], q[1])
    }

    /// Euclidean closeness: `|p - q| < epsilon * max(1, |coordinate|)` over all four
    /// coordinates. Unlike [`Tolerance::points_close`] the bound does not shrink on an
    /// axis where both points happen to have small coordinates.
    pub fn points_near(&self, p: &Point, q: &Point) -> bool {
        let scale = 1f64.max(p[0].abs()).max(p[1].abs()).max(q[0].abs()).max(q[1].abs());
        let dx = p[0] - q[0];
        let dy = p[1] - q[1];
        let bound = self.epsilon * scale;
        dx * dx + dy * dy < bound * bound
    }

    /// True if `value` vanishes relative to `scale`, the magnitude of the terms it was
    /// computed from.
    pub fn is_negligible(&self, value: f64, scale: f64) -> bool {
        value.abs() <= self.epsilon * scale
    }
}

/// Approximate equality: `|a - b| < epsilon * max(1, |a|, |b|)`.
pub fn is_close(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon * 1f64.max(a.abs()).max(b.abs())
}

/// A line in implicit form `a*x + b*y + c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The line through two points.
    pub fn through(p: &Point, q: &Point) -> Self {
        Self {
            a: p[1] - q[1],
            b: q[0] - p[0],
            c: p[0] * q[1] - q[0] * p[1],
        }
    }

    pub fn coefficients(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Signed value of the line equation at `p`; zero on the line.
    pub fn eval(&self, p: &Point) -> f64 {
        self.a * p[0] + self.b * p[1] + self.c
    }

    /// A line without direction, e.g. the bisector of two coincident points.
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        tol.is_close(self.a, 0.0) && tol.is_close(self.b, 0.0)
    }

    /// True if both lines have proportional coefficients, i.e. they are the same line.
    pub fn is_proportional(&self, other: &Line, tol: &Tolerance) -> bool {
        if self.b != 0.0 && other.b != 0.0 {
            tol.is_close(self.a / self.b, other.a / other.b) && tol.is_close(self.c / self.b, other.c / other.b)
        } else if self.b == 0.0 && other.b == 0.0 && self.a != 0.0 && other.a != 0.0 {
            tol.is_close(self.c / self.a, other.c / other.a)
        } else {
            false
        }
    }
}

/// Perpendicular bisector of `p` and `q`: direction `q - p`, through the midpoint.
pub fn bisector(p: &Point, q: &Point) -> Line {
    let mx = (p[0] + q[0]) * 0.5;
    let my = (p[1] + q[1]) * 0.5;
    let a = q[0] - p[0];
    let b = q[1] - p[1];
    Line { a, b, c: -mx * a - my * b }
}

pub fn cross_2d(u: &[f64; 2], v: &[f64; 2]) -> f64 {
    u[0] * v[1] - u[1] * v[0]
}

/// Cross product of two homogeneous triples.
pub fn cross_3d(u: &[f64; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Intersection of `line` with the finite segment `[start, end]`.
///
/// Returns `None` for parallel or coincident lines and for intersections outside the
/// segment. Axis-aligned segments accept their endpoints through an inclusive interval
/// check along the varying axis; other segments accept points strictly between the
/// endpoints on both axes, or within tolerance of an endpoint.
pub fn line_segment_intersection(line: &Line, start: &Point, end: &Point, tol: &Tolerance) -> Option<Point> {
    if tol.points_close(start, end) {
        return None;
    }

    let segment = Line::through(start, end);
    if line.is_proportional(&segment, tol) {
        return None;
    }

    let [hx, hy, hz] = cross_3d(&line.coefficients(), &segment.coefficients());
    let scale = (line.a * segment.b).abs() + (line.b * segment.a).abs();
    if hz == 0.0 || tol.is_negligible(hz, scale) {
        return None;
    }
    let p = [hx / hz, hy / hz];

    let vertical = tol.is_close(start[0], end[0]);
    let horizontal = tol.is_close(start[1], end[1]);
    let endpoint_x = tol.is_close(p[0], start[0]) || tol.is_close(p[0], end[0]);
    let endpoint_y = tol.is_close(p[1], start[1]) || tol.is_close(p[1], end[1]);
    let between_x = (p[0] < start[0]) != (p[0] < end[0]);
    let between_y = (p[1] < start[1]) != (p[1] < end[1]);

    let on_segment = if vertical {
        endpoint_y || between_y
    } else if horizontal {
        endpoint_x || between_x
    } else {
        (between_x && between_y) || tol.points_close(&p, start) || tol.points_close(&p, end)
    };

    on_segment.then_some(p)
}

/// Inside test for convex polygons of either winding, boundary inclusive.
///
/// The point must lie on the inner side of every edge, where the inner side follows
/// from the sign of the polygon's area. Collinear or repeated vertices only add edges
/// with a zero cross product, so they never flip the result.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let orientation: f64 = (0..n).map(|i| cross_2d(&polygon[i], &polygon[(i + 1) % n])).sum();
    if orientation == 0.0 {
        return false;
    }

    (0..n).all(|i| {
        let start = polygon[i];
        let end = polygon[(i + 1) % n];
        let edge = [end[0] - start[0], end[1] - start[1]];
        let to_point = [point[0] - start[0], point[1] - start[1]];
        cross_2d(&edge, &to_point) * orientation >= 0.0
    })
}
