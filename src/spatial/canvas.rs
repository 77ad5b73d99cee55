//! Mutable full-resolution raster painted by the refinement engine

use crate::math::{Color, ErrorMetric};
use crate::spatial::{PixelSource, Rectangle};
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::{Array3, Axis, Slice};

/// Raster buffer covering the image bounding box
///
/// Pixels are stored as `(row, col, channel)` with 16-bit channels. Painting
/// uses absolute image coordinates; anything outside the bounds is clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    bounds: Rectangle,
    pixels: Array3<u16>,
}

impl Canvas {
    /// Create a canvas over `bounds` filled with `fill`
    pub fn new(bounds: Rectangle, fill: Color) -> Self {
        let mut pixels = Array3::zeros((bounds.height as usize, bounds.width as usize, 4));
        for (channel, value) in fill.0.into_iter().enumerate() {
            pixels.index_axis_mut(Axis(2), channel).fill(value);
        }
        Self { bounds, pixels }
    }

    /// Region covered by the canvas
    pub const fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Color at absolute coordinates, `None` outside the canvas
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let row = (y - self.bounds.y) as usize;
        let col = (x - self.bounds.x) as usize;
        let mut channels = [0u16; 4];
        for (channel, slot) in channels.iter_mut().enumerate() {
            *slot = self.pixels.get((row, col, channel)).copied()?;
        }
        Some(Color(channels))
    }

    /// Fill `rect` with a flat color, overwriting whatever was painted there
    pub fn paint(&mut self, rect: &Rectangle, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds) else {
            return;
        };
        let row = (clipped.y - self.bounds.y) as usize;
        let col = (clipped.x - self.bounds.x) as usize;
        let rows = row..row + clipped.height as usize;
        let cols = col..col + clipped.width as usize;
        let mut region = self.pixels.slice_each_axis_mut(|axis| match axis.axis.index() {
            0 => Slice::from(rows.clone()),
            1 => Slice::from(cols.clone()),
            _ => Slice::from(..),
        });
        for (channel, value) in color.0.into_iter().enumerate() {
            region.index_axis_mut(Axis(2), channel).fill(value);
        }
    }

    /// Sum over all pixels of the deviation between the canvas and `source`
    pub fn total_error<S: PixelSource + ?Sized>(&self, source: &S, metric: ErrorMetric) -> f64 {
        self.bounds
            .pixels()
            .map(|(x, y)| metric.deviation(self.pixel(x, y), source.pixel(x, y)))
            .sum()
    }

    /// Convert to an 8-bit RGBA image with a zero-based origin
    pub fn to_rgba8(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width(), self.height(), |col, row| {
            Rgba(self.at_offset(col, row).to_rgba8())
        })
    }

    /// Convert to a 16-bit RGBA image with a zero-based origin
    pub fn to_rgba16(&self) -> ImageBuffer<Rgba<u16>, Vec<u16>> {
        ImageBuffer::from_fn(self.width(), self.height(), |col, row| {
            Rgba(self.at_offset(col, row).0)
        })
    }

    fn at_offset(&self, col: u32, row: u32) -> Color {
        let mut channels = [0u16; 4];
        for (channel, slot) in channels.iter_mut().enumerate() {
            *slot = self
                .pixels
                .get((row as usize, col as usize, channel))
                .copied()
                .unwrap_or(0);
        }
        Color(channels)
    }
}

impl PixelSource for Canvas {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        self.get(x, y).unwrap_or(Color::TRANSPARENT)
    }
}
