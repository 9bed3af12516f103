//! Random placement of square tiles over a source image
//!
//! Placement generation is a pure function of the random source, so a seeded
//! generator reproduces the exact same sequence of tiles.

use crate::math::rounding::{round_to_i64, round_to_u32};
use crate::spatial::region::Region;
use rand::Rng;

/// Upper-left corner and side length of a square tile in source coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Column of the upper-left corner, possibly negative
    pub x: i64,
    /// Row of the upper-left corner, possibly negative
    pub y: i64,
    /// Side length of the sampled square
    pub side: u32,
}

impl TilePlacement {
    /// Side length of the synthesized tile once scaled to the canvas
    pub fn output_side(&self, scale: f64) -> u32 {
        round_to_u32(f64::from(self.side) * scale)
    }

    /// Source region sampled by this tile
    pub const fn region(&self) -> Region {
        Region::square(self.x, self.y, self.side as i64)
    }
}

/// Side length of a tile for a uniform random draw in `[0, 1)`
///
/// Sides range between one and two times the mean image dimension divided by
/// `blur`, and are never smaller than one pixel.
pub fn tile_side_length(random: f64, source_width: u32, source_height: u32, blur: f64) -> u32 {
    let mean_dimension = (f64::from(source_width) + f64::from(source_height)) / 2.0;
    round_to_u32((random + 1.0) * mean_dimension / blur).max(1)
}

/// Generate `count` tile placements in painting order
///
/// Each tile is centred near a uniformly random point of the source image and
/// may overhang its edges.
pub fn generate_placements<R: Rng + ?Sized>(
    rng: &mut R,
    source_width: u32,
    source_height: u32,
    count: usize,
    blur: f64,
) -> Vec<TilePlacement> {
    (0..count)
        .map(|_| {
            let side = tile_side_length(rng.random::<f64>(), source_width, source_height, blur);
            let half_side = f64::from(side) / 2.0;
            let x = round_to_i64(rng.random::<f64>().mul_add(f64::from(source_width), -half_side));
            let y = round_to_i64(rng.random::<f64>().mul_add(f64::from(source_height), -half_side));
            TilePlacement { x, y, side }
        })
        .collect()
}
