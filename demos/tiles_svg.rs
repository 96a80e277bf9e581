use plotters::prelude::*;
use rand::Rng;
use vorotiles::{DiagramConfig, Point, RoundedCorner, RoundingConfig, VoronoiBuilder};

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 720.0;
const SITES: usize = 40;
const FRAMES: usize = 3;
const CURVE_STEPS: usize = 8;

/// A site drifting across the surface, bouncing off its edges.
struct Mover {
    position: Point,
    velocity: [f64; 2],
}

impl Mover {
    fn step(&mut self, dt: f64) {
        for axis in 0..2 {
            let limit = if axis == 0 { WIDTH } else { HEIGHT };
            self.position[axis] += self.velocity[axis] * dt;
            if self.position[axis] < 0.0 || self.position[axis] > limit {
                self.velocity[axis] = -self.velocity[axis];
                self.position[axis] = self.position[axis].clamp(0.0, limit);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let mut movers: Vec<Mover> = (0..SITES)
        .map(|_| Mover {
            position: [rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)],
            velocity: [rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0)],
        })
        .collect();

    let mut builder = VoronoiBuilder::new(DiagramConfig::default())?;
    let rounding = RoundingConfig::default();

    for frame in 0..FRAMES {
        let sites: Vec<Point> = movers.iter().map(|m| m.position).collect();
        let diagram = builder.compute(&sites, WIDTH, HEIGHT)?;
        let outlines: Vec<Vec<RoundedCorner>> = diagram.rounded_cells(&rounding)?.into_iter().flatten().collect();

        draw_frame(&format!("tiles_{:03}.svg", frame), &outlines, diagram.sites())?;
        movers.iter_mut().for_each(|m| m.step(1.0));
    }

    Ok(())
}

/// Samples the rounded outline: straight edges between corners, cubic curves around them.
fn outline_path(corners: &[RoundedCorner]) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(corners.len() * (CURVE_STEPS + 1) + 1);
    for corner in corners {
        let [p0, c1, c2, p3] = corner.cubic_controls();
        for step in 0..=CURVE_STEPS {
            let t = step as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let w = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
            path.push((
                w[0] * p0[0] + w[1] * c1[0] + w[2] * c2[0] + w[3] * p3[0],
                w[0] * p0[1] + w[1] * c1[1] + w[2] * c2[1] + w[3] * p3[1],
            ));
        }
    }
    if let Some(&first) = path.first() {
        path.push(first);
    }
    path
}

fn draw_frame(filename: &str, outlines: &[Vec<RoundedCorner>], sites: &[Point]) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (WIDTH as u32, HEIGHT as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..WIDTH, 0.0..HEIGHT)?;

    for (i, corners) in outlines.iter().enumerate() {
        let path = outline_path(corners);
        let color = HSLColor(i as f64 / outlines.len().max(1) as f64, 0.6, 0.7);

        chart.draw_series(std::iter::once(Polygon::new(path.clone(), color.filled())))?;
        chart.draw_series(std::iter::once(PathElement::new(path, WHITE.stroke_width(3))))?;
    }

    chart.draw_series(sites.iter().map(|s| Circle::new((s[0], s[1]), 3, BLACK.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
