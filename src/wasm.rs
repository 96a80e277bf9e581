use wasm_bindgen::prelude::*;

use crate::config::DiagramConfig;
use crate::diagram::{Diagram, VoronoiBuilder};
use crate::rounding::{round_corners, RoundedCorner};
use crate::sites::sites_from_flat;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Flattens corners into `[sx, sy, cx, cy, ex, ey, radius, ...]`.
fn flatten_corners(corners: &[RoundedCorner]) -> Vec<f64> {
    corners
        .iter()
        .flat_map(|c| [c.start[0], c.start[1], c.corner[0], c.corner[1], c.end[0], c.end[1], c.radius])
        .collect()
}

/// Rounds a flat polygon `[x, y, x, y, ...]`, returning seven numbers per corner.
#[wasm_bindgen(js_name = roundPolygon)]
pub fn round_polygon(vertices: &[f64], max_distance: f64) -> Result<Option<Vec<f64>>, JsError> {
    let polygon = sites_from_flat(vertices)?;
    Ok(round_corners(&polygon, max_distance).map(|c| flatten_corners(&c)))
}

/// A Voronoi diagram of a drawing surface, recomputed every frame from the current sites.
#[wasm_bindgen(js_name = VoronoiDiagram)]
pub struct VoronoiDiagramWASM {
    builder: VoronoiBuilder,
    width: f64,
    height: f64,
    diagram: Option<Diagram>,
}

#[wasm_bindgen(js_class = VoronoiDiagram)]
impl VoronoiDiagramWASM {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, padding: f64) -> Result<VoronoiDiagramWASM, JsError> {
        let builder = VoronoiBuilder::new(DiagramConfig::default().with_padding(padding))?;
        Ok(VoronoiDiagramWASM { builder, width, height, diagram: None })
    }

    pub fn set_surface(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_padding(&mut self, padding: f64) -> Result<(), JsError> {
        let config = self.builder.config().with_padding(padding);
        Ok(self.builder.set_config(config)?)
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), JsError> {
        let config = self.builder.config().with_epsilon(epsilon);
        Ok(self.builder.set_config(config)?)
    }

    /// Fixes the jitter sequence, making subsequent computations reproducible.
    pub fn set_seed(&mut self, seed: u32) {
        self.builder.set_seed(seed as u64);
    }

    /// Computes the diagram of a flat site array and returns the number of cells.
    /// Throws on an odd number of coordinates.
    pub fn compute(&mut self, sites: &[f64]) -> Result<usize, JsError> {
        let sites = sites_from_flat(sites)?;
        let diagram = self.builder.compute(&sites, self.width, self.height)?;
        let count = diagram.count_cells();
        self.diagram = Some(diagram);
        Ok(count)
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.diagram.as_ref().map_or(0, Diagram::count_cells)
    }

    /// Processed sites of the last computation.
    #[wasm_bindgen(getter)]
    pub fn sites(&self) -> Vec<f64> {
        self.diagram.as_ref().map(Diagram::flat_sites).unwrap_or_default()
    }

    /// Flat vertices of cell `index`, or `undefined` when the cell is missing.
    pub fn cell(&self, index: usize) -> Option<Vec<f64>> {
        self.diagram.as_ref()?.get_cell(index).map(|c| c.flat_vertices())
    }

    pub fn rounded_cell(&self, index: usize, max_distance: f64) -> Option<Vec<f64>> {
        let cell = self.diagram.as_ref()?.get_cell(index)?;
        round_corners(cell.vertices(), max_distance).map(|c| flatten_corners(&c))
    }
}
