use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vorotiles::geometry::{bisector, cross_2d, Line};
use vorotiles::{Cell, CellScratch, ClipOutcome, Point, Tolerance};

fn random_convex_polygon(rng: &mut StdRng, sides: usize, center: Point) -> Vec<Point> {
    let radius = rng.gen_range(10.0..300.0);
    let spacing = TAU / sides as f64;
    let offset = rng.gen_range(0.0..TAU);

    let mut polygon: Vec<Point> = (0..sides)
        .map(|i| {
            let angle = offset + spacing * (i as f64 + rng.gen_range(-0.3..0.3));
            [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()]
        })
        .collect();
    if rng.gen_bool(0.5) {
        polygon.reverse();
    }
    polygon
}

fn random_interior_point(rng: &mut StdRng, polygon: &[Point]) -> Point {
    let weights: Vec<f64> = polygon.iter().map(|_| rng.gen_range(0.1..1.0)).collect();
    let total: f64 = weights.iter().sum();
    polygon.iter().zip(&weights).fold([0.0, 0.0], |acc, (v, w)| {
        [acc[0] + v[0] * w / total, acc[1] + v[1] * w / total]
    })
}

fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| cross_2d(&polygon[i], &polygon[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

/// Signed distance clip, keeping the side of `line` that contains `site`.
fn reference_clip(polygon: &[Point], line: &Line, site: &Point) -> Vec<Point> {
    let side = line.eval(site).signum();
    let n = polygon.len();
    let dists: Vec<f64> = polygon.iter().map(|v| line.eval(v) * side).collect();
    let mut out = Vec::new();

    for i in 0..n {
        let j = (i + 1) % n;
        let (d_i, d_j) = (dists[i], dists[j]);
        if d_i >= 0.0 {
            out.push(polygon[i]);
        }
        if (d_i >= 0.0) != (d_j >= 0.0) {
            let t = d_i / (d_i - d_j);
            out.push([
                polygon[i][0] + t * (polygon[j][0] - polygon[i][0]),
                polygon[i][1] + t * (polygon[j][1] - polygon[i][1]),
            ]);
        }
    }
    out
}

fn assert_convex(polygon: &[Point]) {
    let n = polygon.len();
    let orientation = signed_area(polygon).signum();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let c = polygon[(i + 2) % n];
        let e1 = [b[0] - a[0], b[1] - a[1]];
        let e2 = [c[0] - b[0], c[1] - b[1]];
        let scale = (e1[0].hypot(e1[1]) * e2[0].hypot(e2[1])).max(1e-12);
        assert!(
            cross_2d(&e1, &e2) * orientation >= -1e-6 * scale,
            "Polygon is not convex at vertex {}: {:?}",
            (i + 1) % n,
            polygon
        );
    }
}

/// Largest absolute coordinate, floored at 1.
fn magnitude(polygon: &[Point]) -> f64 {
    polygon.iter().fold(1.0, |acc: f64, v| acc.max(v[0].abs()).max(v[1].abs()))
}

fn perimeter(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            (b[0] - a[0]).hypot(b[1] - a[1])
        })
        .sum()
}

fn check_clip(cell: &mut Cell, site: &Point, other: &Point, tol: &Tolerance, scratch: &mut CellScratch) {
    let before = cell.vertices().to_vec();
    let before_orientation = signed_area(&before).signum();
    let line = bisector(site, other);
    let expected = reference_clip(&before, &line, site);

    let outcome = cell.clip_by_neighbor(site, other, tol, scratch);
    let after = cell.vertices();

    assert!(after.len() >= 3, "Clip collapsed the cell: {:?} -> {:?}", before, after);
    assert!(cell.contains(site), "Clipped cell lost its site {:?}: {:?}", site, after);
    assert_convex(after);
    assert_eq!(signed_area(after).signum(), before_orientation, "Winding flipped");

    // Crossings within the tolerance of a vertex or of each other merge, which leaves
    // the tip of a sharp corner a few tolerances across the line.
    let reach = 8.0 * tol.epsilon * magnitude(&before);
    let norm = line.a.hypot(line.b);
    let side = line.eval(site).signum();
    for v in after {
        assert!(line.eval(v) * side / norm >= -reach, "Vertex {:?} on the clipped side", v);
    }

    let area = signed_area(after).abs();
    let expected_area = signed_area(&expected).abs();
    let slack = 1e-6 * signed_area(&before).abs() + reach * perimeter(&before);
    assert!(
        (area - expected_area).abs() <= slack,
        "Area {} differs from reference {} ({:?})",
        area,
        expected_area,
        outcome
    );
    if outcome == ClipOutcome::Unchanged {
        assert_eq!(after, &before[..]);
    }
}

#[test]
fn test_random_polygon_random_cut() {
    let mut rng = StdRng::seed_from_u64(123456789);
    let tol = Tolerance::default();
    let mut scratch = CellScratch::default();

    for _ in 0..2000 {
        let sides = rng.gen_range(3..=16);
        let center = [rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0)];
        let polygon = random_convex_polygon(&mut rng, sides, center);
        let site = random_interior_point(&mut rng, &polygon);
        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.gen_range(1.0..600.0);
        let other = [site[0] + distance * angle.cos(), site[1] + distance * angle.sin()];

        let mut cell = Cell::from_vertices(0, polygon);
        check_clip(&mut cell, &site, &other, &tol, &mut scratch);
    }
}

#[test]
fn test_sequential_clips_on_many_sided_cells() {
    let mut rng = StdRng::seed_from_u64(42);
    let tol = Tolerance::default();
    let mut scratch = CellScratch::default();

    for _ in 0..50 {
        let center = [rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0)];
        let polygon = random_convex_polygon(&mut rng, 24, center);
        let site = random_interior_point(&mut rng, &polygon);
        let mut cell = Cell::from_vertices(0, polygon);

        // Neighbours close to the site keep cutting the cell into many-sided shapes.
        for _ in 0..30 {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(5.0..80.0);
            let other = [site[0] + distance * angle.cos(), site[1] + distance * angle.sin()];
            check_clip(&mut cell, &site, &other, &tol, &mut scratch);
        }
    }
}

#[test]
fn test_cuts_near_vertices_at_screen_scale() {
    let mut rng = StdRng::seed_from_u64(935);
    let tol = Tolerance::default();
    let mut scratch = CellScratch::default();

    for _ in 0..3000 {
        let sides = rng.gen_range(3..=16);
        let center = [rng.gen_range(800.0..1900.0), rng.gen_range(500.0..1080.0)];
        let polygon = random_convex_polygon(&mut rng, sides, center);
        let site = random_interior_point(&mut rng, &polygon);
        let vertex = polygon[rng.gen_range(0..sides)];

        // A cutting line through `vertex`, tilted away from the site direction and
        // shifted along its normal by a few tolerances either way.
        let toward = [vertex[0] - site[0], vertex[1] - site[1]];
        let angle = toward[1].atan2(toward[0]) + rng.gen_range(-1.2..1.2);
        let normal = [angle.cos(), angle.sin()];
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let shift = sign * rng.gen_range(0.1..10.0) * tol.epsilon * vertex[0].abs().max(vertex[1].abs());
        let height = normal[0] * toward[0] + normal[1] * toward[1] + shift;
        let other = [site[0] + 2.0 * height * normal[0], site[1] + 2.0 * height * normal[1]];

        let mut cell = Cell::from_vertices(0, polygon);
        check_clip(&mut cell, &site, &other, &tol, &mut scratch);
    }
}

#[test]
fn test_cut_through_vertex_pairs() {
    // Cutting lines through two opposite vertices of regular polygons.
    let tol = Tolerance::default();
    let mut scratch = CellScratch::default();

    for sides in [4usize, 6, 8, 12] {
        let polygon: Vec<Point> = (0..sides)
            .map(|i| {
                let angle = TAU * i as f64 / sides as f64;
                [100.0 * angle.cos(), 100.0 * angle.sin()]
            })
            .collect();
        let half = sides / 2;

        for start in 0..half {
            let a = polygon[start];
            let b = polygon[start + half];
            // Sites mirrored across the line a-b.
            let normal = [-(b[1] - a[1]), b[0] - a[0]];
            let site = [normal[0] * 0.1, normal[1] * 0.1];
            let other = [-site[0], -site[1]];

            for (s, o) in [(site, other), (other, site)] {
                let mut cell = Cell::from_vertices(0, polygon.clone());
                check_clip(&mut cell, &s, &o, &tol, &mut scratch);
                assert!((cell.area() - Cell::from_vertices(0, polygon.clone()).area() / 2.0).abs() < 1e-6);
            }
        }
    }
}
