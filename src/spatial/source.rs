//! Read-only pixel grids consumed by the partition tree builder

use crate::math::Color;
use crate::spatial::Rectangle;
use image::{ImageBuffer, Pixel, Primitive, Rgba};
use std::ops::Deref;

/// Random-access 4-channel pixel grid with a fixed bounding box
///
/// The bounding box is not required to start at the origin. Lookups outside
/// the bounding box return [`Color::TRANSPARENT`].
pub trait PixelSource {
    /// Region covered by the source
    fn bounds(&self) -> Rectangle;

    /// Sample the pixel at absolute coordinates `(x, y)`
    fn pixel(&self, x: i32, y: i32) -> Color;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn bounds(&self) -> Rectangle {
        (**self).bounds()
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        (**self).pixel(x, y)
    }
}

// Any channel type is rescaled onto the full 16-bit range using its nominal maximum
fn widen_channel<P: Primitive>(value: P) -> u16 {
    let max = num_traits::cast::<P, f64>(P::DEFAULT_MAX_VALUE).unwrap_or(1.0);
    let value = num_traits::cast::<P, f64>(value).unwrap_or(0.0);
    if max <= 0.0 {
        return 0;
    }
    (value / max * f64::from(u16::MAX))
        .round()
        .clamp(0.0, f64::from(u16::MAX)) as u16
}

impl<P, C> PixelSource for ImageBuffer<Rgba<P>, C>
where
    P: Primitive,
    Rgba<P>: Pixel<Subpixel = P>,
    C: Deref<Target = [P]>,
{
    fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width(), self.height())
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return Color::TRANSPARENT;
        };
        self.get_pixel_checked(x, y)
            .map_or(Color::TRANSPARENT, |pixel| Color(pixel.0.map(widen_channel)))
    }
}

/// Shifts a zero-based source so that its bounding box starts at `origin`
#[derive(Clone, Debug)]
pub struct Translated<S> {
    inner: S,
    origin: [i32; 2],
}

impl<S: PixelSource> Translated<S> {
    /// Place `inner` so that its top-left pixel sits at `origin` (x, y)
    pub const fn new(inner: S, origin: [i32; 2]) -> Self {
        Self { inner, origin }
    }

    /// Wrapped source
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PixelSource> PixelSource for Translated<S> {
    fn bounds(&self) -> Rectangle {
        let inner = self.inner.bounds();
        Rectangle::new(
            inner.x + self.origin[0],
            inner.y + self.origin[1],
            inner.width,
            inner.height,
        )
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        self.inner.pixel(x - self.origin[0], y - self.origin[1])
    }
}
