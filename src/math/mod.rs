//! Color arithmetic shared by the tree builder and the canvas

/// 16-bit colors, weighted averaging and deviation metrics
pub mod color;

pub use color::{ChannelSums, Color, ErrorMetric};
