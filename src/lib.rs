//! # vorotiles
//!
//! `vorotiles` is a Rust library for the 2D Voronoi tilings behind animated
//! generative-art wallpapers, designed to be used in Rust as well as compiled to
//! WebAssembly (WASM). Every frame, a set of moving sites partitions the drawing surface
//! into convex cells, which a renderer then draws with rounded corners.
//!
//! ## Features
//!
//! - **Half-plane clipping**: each cell starts as the padded bounding box and is clipped
//!   by the bisector with every other site.
//! - **Robust by construction**: sites are deduplicated and jittered, and every
//!   comparison goes through a configurable relative tolerance.
//! - **Corner rounding**: control geometry for drawing cells with rounded corners.
//! - **WASM-first**: Built with `wasm-bindgen` for use from a JavaScript render loop.
//!
//! ## Example
//!
//! ```
//! use vorotiles::{DiagramConfig, VoronoiBuilder};
//!
//! let mut builder = VoronoiBuilder::with_seed(DiagramConfig::default(), 7).unwrap();
//! let sites = [[100.0, 100.0], [200.0, 100.0], [150.0, 200.0]];
//! let diagram = builder.compute(&sites, 300.0, 300.0).unwrap();
//! assert_eq!(diagram.count_cells(), 3);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry points are [`VoronoiBuilder`] for frame-by-frame use and
//! [`Diagram::compute`] for full control over bounds and the jitter source.

mod bounds;
mod cell;
mod config;
mod diagram;
mod error;
pub mod geometry;
mod rounding;
pub mod sites;
mod wasm;

pub use bounds::BoundingBox;
pub use cell::Cell;
pub use cell::CellScratch;
pub use cell::ClipOutcome;
pub use config::DiagramConfig;
pub use config::RoundingConfig;
pub use diagram::Diagram;
pub use diagram::VoronoiBuilder;
pub use diagram::MIN_SITES;
pub use error::VoronoiError;
pub use error::VoronoiResult;
pub use geometry::Point;
pub use geometry::Tolerance;
pub use rounding::round_corners;
pub use rounding::strip_closing_vertex;
pub use rounding::RoundedCorner;
pub use wasm::round_polygon;
pub use wasm::VoronoiDiagramWASM;
