/// Command-line parsing and batch orchestration
pub mod cli;
/// Default settings and output naming
pub mod configuration;
/// Error type shared across the crate
pub mod error;
/// Source decoding and still-image export
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Animated GIF export
pub mod visualization;
