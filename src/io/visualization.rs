//! GIF encoding of refinement snapshots

use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{ArtError, Result};
use crate::io::image::ensure_parent_dir;
use crate::spatial::Canvas;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Collects rasters in display order and writes them as a looping GIF
///
/// The GIF encoder quantizes every frame to its own palette.
#[derive(Debug, Default, Clone)]
pub struct Animation {
    frames: Vec<RgbaImage>,
}

impl Animation {
    /// Create an empty animation
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a painted canvas
    pub fn push_canvas(&mut self, canvas: &Canvas) {
        self.frames.push(canvas.to_rgba8());
    }

    /// Append an already-converted image
    pub fn push_image(&mut self, image: RgbaImage) {
        self.frames.push(image);
    }

    /// Number of frames collected
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frame was collected
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Encode the frames as an infinitely looping GIF
    ///
    /// Every frame is shown for `frame_delay_ms`; the closing frame is held
    /// for `FINAL_FRAME_HOLD` times as long.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were collected
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(ArtError::InvalidSourceData {
                reason: "No frames captured for animation".to_string(),
            });
        }

        ensure_parent_dir(output_path)?;

        let file = File::create(output_path).map_err(|e| ArtError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, image)| {
            let delay_ms = if index == last {
                frame_delay_ms.saturating_mul(FINAL_FRAME_HOLD)
            } else {
                frame_delay_ms
            };
            Frame::from_parts(
                image.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });

        let export_error = |e| ArtError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };

        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)?;

        Ok(())
    }
}
