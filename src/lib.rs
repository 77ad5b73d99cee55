//! Error-driven quadtree approximation of raster images
//!
//! An image is partitioned into a tree of rectangles, each carrying the flat
//! color that best represents it and a score of how poorly that color fits.
//! Refinement repeatedly paints the worst-fitting region and descends into its
//! quadrants, producing progressively sharper snapshots.

#![forbid(unsafe_code)]

/// Priority queue and the refinement engine
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Color arithmetic and error metrics
pub mod math;
/// Rectangles, pixel sources, the partition tree and the canvas
pub mod spatial;

pub use io::error::{ArtError, Result};
