//! Runtime configuration defaults and output settings

// Refinement defaults
/// Default number of refinement steps
pub const DEFAULT_STEPS: usize = 100;
/// Default number of steps between captured animation frames
pub const DEFAULT_SAMPLE_PERIOD: usize = 20;

// Output settings
/// Suffix added to the final still image
pub const FINAL_SUFFIX: &str = "_final";
/// Suffix added to the animated GIF
pub const ANIMATION_SUFFIX: &str = "_animated";
/// Extension of the final still image
pub const FINAL_EXTENSION: &str = "jpg";
/// Extension of the animation
pub const ANIMATION_EXTENSION: &str = "gif";
/// Default JPEG quality of the final still image (1-100)
pub const JPEG_QUALITY: u8 = 90;
/// Default delay between GIF frames
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;
// The last frame stays on screen longer before the animation loops
/// Multiplier applied to the frame delay of the closing GIF frame
pub const FINAL_FRAME_HOLD: u32 = 25;

/// Input extensions picked up in directory mode (lowercase)
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
