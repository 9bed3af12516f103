//! Square gradient tiles blended from four quadrant colors
//!
//! The source square is split into quadrants whose average colors are pinned
//! to the corners of the output tile. Every output pixel is the
//! inverse-distance weighted mix of those four colors.

use crate::algorithm::averaging::average_color;
use crate::math::weights::{CORNER_COUNT, Color, blend_corners, corner_weights};
use crate::spatial::region::{ClampedRegion, Region};
use image::RgbaImage;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

const CHANNELS: usize = 4;

/// Visible part of a tile, positioned in canvas coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePatch {
    /// Canvas column of the patch's upper-left pixel
    pub x: u32,
    /// Canvas row of the patch's upper-left pixel
    pub y: u32,
    /// Rendered pixels
    pub image: RgbaImage,
}

/// Average colors of the four quadrants of a source square
///
/// Ordered top-left, top-right, bottom-left, bottom-right.
pub fn quadrant_colors(source: &RgbaImage, square: Region) -> [Color; CORNER_COUNT] {
    square
        .quadrants()
        .map(|quadrant| average_color(source, quadrant))
}

/// Synthesize a gradient tile at the same size as its source square
pub fn square_tile(source: &RgbaImage, x: i64, y: i64, side: u32) -> RgbaImage {
    square_tile_scaled(source, x, y, side, side)
}

/// Synthesize a gradient tile of `output_side` pixels from a source square
pub fn square_tile_scaled(
    source: &RgbaImage,
    x: i64,
    y: i64,
    side: u32,
    output_side: u32,
) -> RgbaImage {
    let colors = quadrant_colors(source, Region::square(x, y, i64::from(side)));
    gradient_tile(&colors, output_side)
}

/// Real-valued color of one tile pixel
pub fn gradient_color_at(colors: &[Color; CORNER_COUNT], px: f64, py: f64, side: f64) -> Color {
    blend_corners(colors, &corner_weights(px, py, side))
}

/// Render the four-corner gradient into a new square image
pub fn gradient_tile(colors: &[Color; CORNER_COUNT], output_side: u32) -> RgbaImage {
    let whole = ClampedRegion {
        x: 0,
        y: 0,
        width: output_side,
        height: output_side,
    };
    gradient_window(colors, output_side, whole)
}

/// Render only `window` of a gradient tile with `side` pixels per edge
///
/// `window` is given in tile coordinates. Rows are filled in parallel and
/// channel values are rounded to the nearest 8-bit level.
pub fn gradient_window(
    colors: &[Color; CORNER_COUNT],
    side: u32,
    window: ClampedRegion,
) -> RgbaImage {
    let mut patch = RgbaImage::new(window.width, window.height);
    let row_length = window.width as usize * CHANNELS;
    if row_length == 0 {
        return patch;
    }

    let side = f64::from(side);
    patch
        .par_chunks_mut(row_length)
        .enumerate()
        .for_each(|(row, pixels)| {
            let py = f64::from(window.y) + row as f64;
            for (column, pixel) in pixels.chunks_exact_mut(CHANNELS).enumerate() {
                let px = f64::from(window.x) + column as f64;
                let color = gradient_color_at(colors, px, py, side);
                for (channel, value) in pixel.iter_mut().zip(color) {
                    *channel = value.round() as u8;
                }
            }
        });

    patch
}

/// Render the part of a tile placed at `(x, y)` that lands on the canvas
///
/// Pixels falling outside a `canvas_width` x `canvas_height` canvas are never
/// computed, so the work is bounded by the canvas whatever `output_side` is.
/// Returns `None` when the tile misses the canvas entirely.
pub fn visible_patch(
    colors: &[Color; CORNER_COUNT],
    output_side: u32,
    x: i64,
    y: i64,
    canvas_width: u32,
    canvas_height: u32,
) -> Option<TilePatch> {
    let footprint = Region::square(x, y, i64::from(output_side));
    let visible = footprint.intersection(canvas_width, canvas_height)?;
    let window = ClampedRegion {
        x: (i64::from(visible.x) - x) as u32,
        y: (i64::from(visible.y) - y) as u32,
        ..visible
    };

    Some(TilePatch {
        x: visible.x,
        y: visible.y,
        image: gradient_window(colors, output_side, window),
    })
}
