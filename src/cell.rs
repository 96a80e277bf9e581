use crate::bounds::BoundingBox;
use crate::geometry::{bisector, line_segment_intersection, point_in_polygon, Line, Point, Tolerance};

/// Scratch buffer to reuse allocations during clipping.
#[derive(Default, Clone)]
pub struct CellScratch {
    vertices: Vec<Point>,
}

/// Outcome of a single half-plane clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The cutting line did not cross the cell, or only touched it.
    Unchanged,
    /// The cell was replaced by the part on the site's side of the line.
    Clipped,
}

/// A 2D Voronoi cell represented as a convex polygon.
///
/// Vertices are stored without a duplicate closing vertex, in the winding of the
/// bounding box the cell started from.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) id: usize,
    pub(crate) vertices: Vec<Point>,
}

impl Cell {
    /// The full bounding box as the initial cell of generator `id`.
    pub fn new(id: usize, bounds: BoundingBox) -> Cell {
        Cell {
            id,
            vertices: bounds.corners().to_vec(),
        }
    }

    /// Wraps an existing convex polygon.
    pub fn from_vertices(id: usize, vertices: Vec<Point>) -> Cell {
        Cell { id, vertices }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Flat vertex array `[x, y, x, y, ...]`.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| [v[0], v[1]]).collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 { return 0.0; }

        let mut area = 0.0;
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[(i + 1) % n];
            area += xi * yj - xj * yi;
        }
        (area * 0.5).abs()
    }

    pub fn centroid(&self) -> [f64; 2] {
        let n = self.vertices.len();
        if n < 3 { return [0.0, 0.0]; }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[(i + 1) % n];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < 1e-9 {
            return [0.0, 0.0];
        }

        let factor = 1.0 / (3.0 * area);
        [cx * factor, cy * factor]
    }

    /// Squared distance from `center` to the furthest vertex.
    pub fn max_radius_sq(&self, center: &Point) -> f64 {
        self.vertices
            .iter()
            .map(|v| {
                let dx = v[0] - center[0];
                let dy = v[1] - center[1];
                dx * dx + dy * dy
            })
            .fold(0.0, f64::max)
    }

    /// Clips the cell by the bisector of `site` and `other`, keeping the half that
    /// contains `site`.
    ///
    /// Crossings within tolerance of each other count as one, so a line that only grazes
    /// a vertex leaves the cell unchanged.
    pub fn clip_by_neighbor(&mut self, site: &Point, other: &Point, tol: &Tolerance, scratch: &mut CellScratch) -> ClipOutcome {
        let line = bisector(site, other);
        if line.is_degenerate(tol) {
            return ClipOutcome::Unchanged;
        }

        let n = self.vertices.len();
        if n < 3 { return ClipOutcome::Unchanged; }

        let cell = &self.vertices;
        let crossing = |edge: usize| {
            let start = &cell[edge];
            let end = &cell[(edge + 1) % n];
            line_segment_intersection(&line, start, end, tol).map(|p| snap(p, start, end, tol))
        };

        let Some((first_edge, first)) = (0..n).find_map(|i| crossing(i).map(|p| (i, p))) else {
            return ClipOutcome::Unchanged;
        };

        // The first edge only meets the line at the first crossing.
        let Some((second_edge, second)) = (1..n).find_map(|step| {
            let edge = (first_edge + step) % n;
            crossing(edge)
                .filter(|p| !tol.points_near(p, &first))
                .map(|p| (edge, p))
        }) else {
            return ClipOutcome::Unchanged;
        };

        // Vertices first_edge+1 ..= second_edge lie on the forward arc, the rest on the
        // complementary one.
        let forward = (second_edge + n - first_edge) % n;
        let keep_forward = forward_arc_holds_site(cell, &line, site, first_edge, forward);

        let (head, tail, from_edge, count) = if keep_forward {
            (first, second, first_edge, forward)
        } else {
            (second, first, second_edge, n - forward)
        };

        let arc = &mut scratch.vertices;
        arc.clear();
        arc.push(head);
        for step in 1..=count {
            push_distinct(arc, cell[(from_edge + step) % n], &head, tol);
        }
        push_distinct(arc, tail, &head, tol);

        std::mem::swap(&mut self.vertices, &mut scratch.vertices);
        ClipOutcome::Clipped
    }
}

/// Decides which arc to keep from the vertex furthest from the line.
///
/// The site never lies on its own bisector, and the furthest vertex is the one least
/// affected by rounding.
fn forward_arc_holds_site(cell: &[Point], line: &Line, site: &Point, first_edge: usize, forward: usize) -> bool {
    let n = cell.len();
    let side = line.eval(site);
    let mut furthest = 0.0;
    let mut keep_forward = true;
    for step in 1..=n {
        let value = line.eval(&cell[(first_edge + step) % n]);
        if value.abs() > furthest {
            furthest = value.abs();
            keep_forward = (value * side > 0.0) == (step <= forward);
        }
    }
    keep_forward
}

/// Replaces `p` with a segment endpoint when they coincide within tolerance.
fn snap(p: Point, start: &Point, end: &Point, tol: &Tolerance) -> Point {
    if tol.points_near(&p, end) {
        *end
    } else if tol.points_near(&p, start) {
        *start
    } else {
        p
    }
}

/// Appends `vertex` unless it repeats the last vertex or closes onto `head`.
fn push_distinct(arc: &mut Vec<Point>, vertex: Point, head: &Point, tol: &Tolerance) {
    let repeats_last = arc.last().is_some_and(|last| tol.points_near(last, &vertex));
    let closes = arc.len() > 1 && tol.points_near(head, &vertex);
    if !repeats_last && !closes {
        arc.push(vertex);
    }
}
