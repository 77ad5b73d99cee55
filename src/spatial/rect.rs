//! Integer rectangles and the quadrant split used by the partition tree

use std::fmt;

/// Child slot of an internal partition node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left child
    TopLeft,
    /// Upper-right child
    TopRight,
    /// Lower-left child
    BottomLeft,
    /// Lower-right child
    BottomRight,
}

impl Quadrant {
    /// All quadrants in slot order
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Slot index in `[0, 4)`
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Axis-aligned rectangle with an integer origin
///
/// The origin is inclusive and `x + width`, `y + height` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle from origin and size
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Leaf rule of the partition tree: a single row or a single column
    ///
    /// A 1×k strip is a leaf even when it covers several pixels.
    pub const fn is_leaf(&self) -> bool {
        self.width == 1 || self.height == 1
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Test whether a pixel coordinate lies inside the rectangle
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        (x as i64) >= self.x as i64
            && (x as i64) < self.right()
            && (y as i64) >= self.y as i64
            && (y as i64) < self.bottom()
    }

    /// Overlapping region of two rectangles, `None` when disjoint
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        (right > left && bottom > top).then(|| {
            Self::new(
                left as i32,
                top as i32,
                (right - left) as u32,
                (bottom - top) as u32,
            )
        })
    }

    /// Split into top-left, top-right, bottom-left and bottom-right quadrants
    ///
    /// The left and top halves take the floor of half the size so odd
    /// dimensions still tile exactly. Returns `None` for leaf rectangles.
    pub fn quadrants(&self) -> Option<[Self; 4]> {
        if self.is_leaf() || self.is_empty() {
            return None;
        }

        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let mid_x = self.x + half_w as i32;
        let mid_y = self.y + half_h as i32;

        Some([
            Self::new(self.x, self.y, half_w, half_h),
            Self::new(mid_x, self.y, self.width - half_w, half_h),
            Self::new(self.x, mid_y, half_w, self.height - half_h),
            Self::new(mid_x, mid_y, self.width - half_w, self.height - half_h),
        ])
    }

    /// Pixel coordinates in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let Self {
            x,
            y,
            width,
            height,
        } = *self;
        (0..height).flat_map(move |dy| (0..width).map(move |dx| (x + dx as i32, y + dy as i32)))
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}
