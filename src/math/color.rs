//! 16-bit RGBA colors, channel accumulation and per-channel deviation metrics

use std::fmt;

const CHANNEL_MAX: f64 = u16::MAX as f64;

/// Four-channel color with 16 bits per channel (R, G, B, A)
///
/// Averaging is repeated once per tree level, so channels are kept at 16-bit
/// precision to avoid quantization drift between levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub [u16; 4]);

impl Color {
    /// Fully transparent black, the default canvas fill
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Build a color from 16-bit channels
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self([r, g, b, a])
    }

    /// Widen an 8-bit RGBA sample (each channel scaled by 257)
    pub const fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self([
            rgba[0] as u16 * 257,
            rgba[1] as u16 * 257,
            rgba[2] as u16 * 257,
            rgba[3] as u16 * 257,
        ])
    }

    /// Narrow to 8-bit RGBA with rounding
    pub const fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b, a] = self.0;
        [narrow(r), narrow(g), narrow(b), narrow(a)]
    }

    /// Channels normalised to `[0, 1]`
    pub fn normalized(self) -> [f64; 4] {
        self.0.map(|c| f64::from(c) / CHANNEL_MAX)
    }
}

const fn narrow(channel: u16) -> u8 {
    ((channel as u32 + 128) / 257) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Weighted per-channel running sums used to average colors
#[derive(Clone, Copy, Debug, Default)]
pub struct ChannelSums {
    sums: [f64; 4],
    weight: f64,
}

impl ChannelSums {
    /// Create empty sums
    pub const fn new() -> Self {
        Self {
            sums: [0.0; 4],
            weight: 0.0,
        }
    }

    /// Add a color with the given weight (pixel count or child area)
    pub fn add(&mut self, color: Color, weight: f64) {
        for (sum, channel) in self.sums.iter_mut().zip(color.0) {
            *sum = f64::from(channel).mul_add(weight, *sum);
        }
        self.weight += weight;
    }

    /// Total weight accumulated so far
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Weighted mean rounded to the nearest 16-bit value, `None` when nothing was added
    pub fn mean(&self) -> Option<Color> {
        if self.weight <= 0.0 {
            return None;
        }
        let weight = self.weight;
        Some(Color(
            self.sums
                .map(|sum| (sum / weight).round().clamp(0.0, CHANNEL_MAX) as u16),
        ))
    }
}

/// Per-channel deviation used to score a flat-color approximation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorMetric {
    /// Squared deviation of normalised channels
    #[default]
    Squared,
    /// Absolute deviation of normalised channels
    Absolute,
}

impl ErrorMetric {
    /// Deviation of `sample` from `reference`, summed over the four channels
    pub fn deviation(self, sample: Color, reference: Color) -> f64 {
        let sample = sample.normalized();
        let reference = reference.normalized();
        sample
            .iter()
            .zip(reference.iter())
            .map(|(s, r)| {
                let delta = s - r;
                match self {
                    Self::Squared => delta * delta,
                    Self::Absolute => delta.abs(),
                }
            })
            .sum()
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Squared => write!(f, "squared"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}
