use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::cell::{Cell, CellScratch};
use crate::config::{DiagramConfig, RoundingConfig};
use crate::error::VoronoiResult;
use crate::geometry::{Point, Tolerance};
use crate::rounding::RoundedCorner;
use crate::sites::{dedup_sites, jitter_sites, validate_sites};

/// Minimum number of distinct sites for a meaningful diagram.
pub const MIN_SITES: usize = 3;

/// The result of one diagram computation.
///
/// Cell `i` belongs to site `i` of the processed (deduplicated and jittered) sites.
/// A `None` entry marks a site whose cell collapsed or that lies outside the bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    sites: Vec<Point>,
    bounds: BoundingBox,
    cells: Vec<Option<Cell>>,
}

impl Diagram {
    /// Builds the diagram of `sites` inside `bounds`, drawing the site jitter from `rng`.
    ///
    /// With fewer than three distinct sites the diagram has no cells. A site inside the
    /// bounds stays inside after jitter, even on the box edge.
    pub fn compute<R: Rng + ?Sized>(sites: &[Point], bounds: BoundingBox, config: &DiagramConfig, rng: &mut R) -> VoronoiResult<Diagram> {
        config.validate()?;
        validate_sites(sites)?;
        let bounds = bounds.validated()?;
        let tol = config.tolerance()?;

        let mut processed = dedup_sites(sites);
        let inside: Vec<bool> = processed.iter().map(|s| bounds.contains(s)).collect();
        jitter_sites(&mut processed, tol.epsilon, config.jitter_scale, rng);
        for (site, inside) in processed.iter_mut().zip(inside) {
            if inside {
                *site = bounds.clamp(site);
            }
        }
        Ok(Self::from_processed(processed, bounds, &tol))
    }

    /// Builds the diagram of already preprocessed sites, without dedup or jitter.
    pub fn from_processed(sites: Vec<Point>, bounds: BoundingBox, tol: &Tolerance) -> Diagram {
        if sites.len() < MIN_SITES {
            log::debug!("skipping diagram: {} sites, need at least {}", sites.len(), MIN_SITES);
            return Diagram { sites, bounds, cells: Vec::new() };
        }

        let cells = compute_cells(&sites, &bounds, tol);
        let missing = cells.iter().filter(|c| c.is_none()).count();
        log::debug!("computed {} cells for {} sites ({} missing)", cells.len() - missing, sites.len(), missing);

        Diagram { sites, bounds, cells }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn site(&self, index: usize) -> Option<&Point> {
        self.sites.get(index)
    }

    /// Flat site array `[x, y, x, y, ...]`.
    pub fn flat_sites(&self) -> Vec<f64> {
        self.sites.iter().flat_map(|s| [s[0], s[1]]).collect()
    }

    pub fn count_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }

    pub fn get_cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Vertex lists of all cells, `None` where a cell is missing.
    pub fn polygons(&self) -> impl Iterator<Item = Option<&[Point]>> + '_ {
        self.cells.iter().map(|c| c.as_ref().map(Cell::vertices))
    }

    pub fn total_area(&self) -> f64 {
        self.cells.iter().flatten().map(Cell::area).sum()
    }

    /// Corner rounding geometry for every cell.
    pub fn rounded_cells(&self, rounding: &RoundingConfig) -> VoronoiResult<Vec<Option<Vec<RoundedCorner>>>> {
        rounding.validate()?;
        Ok(self
            .polygons()
            .map(|p| p.and_then(|vertices| rounding.apply(vertices)))
            .collect())
    }

    pub fn into_cells(self) -> Vec<Option<Cell>> {
        self.cells
    }
}

/// Clips the bounding box of every site against the bisectors with all other sites.
fn compute_cells(sites: &[Point], bounds: &BoundingBox, tol: &Tolerance) -> Vec<Option<Cell>> {
    #[cfg(feature = "rayon")]
    {
        (0..sites.len())
            .into_par_iter()
            .map_init(CellScratch::default, |scratch, i| build_cell(i, sites, bounds, tol, scratch))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        let mut scratch = CellScratch::default();
        (0..sites.len())
            .map(|i| build_cell(i, sites, bounds, tol, &mut scratch))
            .collect()
    }
}

fn build_cell(index: usize, sites: &[Point], bounds: &BoundingBox, tol: &Tolerance, scratch: &mut CellScratch) -> Option<Cell> {
    let site = sites[index];
    if !bounds.contains(&site) {
        log::warn!("site {} at ({}, {}) lies outside the bounding box", index, site[0], site[1]);
        return None;
    }

    let mut cell = Cell::new(index, *bounds);
    for (other_index, other) in sites.iter().enumerate() {
        if other_index == index { continue; }
        cell.clip_by_neighbor(&site, other, tol, scratch);
    }

    if cell.len() < 3 {
        log::warn!("cell of site {} collapsed to {} vertices", index, cell.len());
        return None;
    }
    Some(cell)
}

/// Owns the diagram settings and the jitter source across frames.
pub struct VoronoiBuilder {
    config: DiagramConfig,
    rng: StdRng,
}

impl VoronoiBuilder {
    /// A builder whose jitter is seeded from system entropy.
    pub fn new(config: DiagramConfig) -> VoronoiResult<Self> {
        config.validate()?;
        Ok(Self { config, rng: StdRng::from_entropy() })
    }

    /// A builder with a deterministic jitter sequence.
    pub fn with_seed(config: DiagramConfig, seed: u64) -> VoronoiResult<Self> {
        config.validate()?;
        Ok(Self { config, rng: StdRng::seed_from_u64(seed) })
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DiagramConfig) -> VoronoiResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Computes the diagram for a drawing surface of `width` x `height`, padded by the
    /// configured margin.
    pub fn compute(&mut self, sites: &[Point], width: f64, height: f64) -> VoronoiResult<Diagram> {
        let bounds = BoundingBox::from_surface(width, height, self.config.padding)?;
        Diagram::compute(sites, bounds, &self.config, &mut self.rng)
    }
}
