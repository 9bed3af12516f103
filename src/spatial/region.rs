//! Rectangular regions that may extend beyond the image they refer to
//!
//! Sampling never reads outside an image. Instead a region is clamped
//! component by component: the origin is pulled onto the nearest valid pixel,
//! then width and height are cut to what remains between that origin and the
//! right and bottom edges.

use num_traits::clamp;

/// Rectangle in an image's coordinate space, not required to lie within bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Column of the upper-left corner
    pub x: i64,
    /// Row of the upper-left corner
    pub y: i64,
    /// Width in pixels
    pub width: i64,
    /// Height in pixels
    pub height: i64,
}

/// Region after clamping, guaranteed to lie within its image
///
/// `x` and `y` always address a valid pixel, while `width` and `height` may be
/// zero when the source region had no positive extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRegion {
    /// Column of the upper-left corner
    pub x: u32,
    /// Row of the upper-left corner
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its corner and extent
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a square region
    pub const fn square(x: i64, y: i64, side: i64) -> Self {
        Self::new(x, y, side, side)
    }

    /// Split the region into its four quadrants
    ///
    /// Ordered top-left, top-right, bottom-left, bottom-right. The left and top
    /// quadrants take half the extent rounded down, the right and bottom ones
    /// the remainder, so together they cover the region exactly.
    pub const fn quadrants(&self) -> [Self; 4] {
        let half_width = self.width / 2;
        let half_height = self.height / 2;
        let rest_width = self.width - half_width;
        let rest_height = self.height - half_height;
        let (x, y) = (self.x, self.y);
        [
            Self::new(x, y, half_width, half_height),
            Self::new(x + half_width, y, rest_width, half_height),
            Self::new(x, y + half_height, half_width, rest_height),
            Self::new(x + half_width, y + half_height, rest_width, rest_height),
        ]
    }

    /// Part of the region lying inside a `width` x `height` area at the origin
    ///
    /// Unlike [`Region::clamp_to`] this is a true intersection. Returns `None`
    /// when nothing overlaps.
    pub fn intersection(&self, width: u32, height: u32) -> Option<ClampedRegion> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.x.saturating_add(self.width).min(i64::from(width));
        let bottom = self.y.saturating_add(self.height).min(i64::from(height));

        (left < right && top < bottom).then(|| ClampedRegion {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Clamp the region to an image of the given dimensions
    ///
    /// Returns `None` only when the image itself has no pixels.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<ClampedRegion> {
        if image_width == 0 || image_height == 0 {
            return None;
        }

        let image_width = i64::from(image_width);
        let image_height = i64::from(image_height);

        let x = clamp(self.x, 0, image_width - 1);
        let y = clamp(self.y, 0, image_height - 1);
        let width = clamp(self.width, 0, image_width - x);
        let height = clamp(self.height, 0, image_height - y);

        Some(ClampedRegion {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: height as u32,
        })
    }
}

impl ClampedRegion {
    /// Whether the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Iterate over the covered pixel coordinates in row-major order
    pub fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        let Self {
            x,
            y,
            width,
            height,
        } = self;
        (y..y + height).flat_map(move |row| (x..x + width).map(move |col| (col, row)))
    }
}
