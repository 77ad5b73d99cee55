//! Spatial data structures for the quadtree approximation
//!
//! This module contains:
//! - Rectangles and the quadrant split
//! - The pixel source abstraction over decoded images
//! - The partition tree and its builder
//! - The canvas painted during refinement

/// Mutable raster painted during refinement
pub mod canvas;
/// Integer rectangles and quadrant splitting
pub mod rect;
/// Read-only pixel grids consumed by the tree builder
pub mod source;
/// Partition tree construction and traversal
pub mod tree;

pub use canvas::Canvas;
pub use rect::{Quadrant, Rectangle};
pub use source::{PixelSource, Translated};
pub use tree::{PartitionNode, PartitionTree};
