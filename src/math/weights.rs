//! Inverse-distance weighting from the four corners of a square
//!
//! A corner's raw weight is `1 / (d + 1)` where `d` is the euclidean distance
//! from the pixel to that corner. The offset keeps the weight finite at the
//! corner itself and caps any single raw weight at 1.

use crate::math::distance::distance_2d;

/// Four-channel color with real-valued channels in RGBA order
pub type Color = [f64; 4];

/// Number of corners contributing to every pixel
pub const CORNER_COUNT: usize = 4;

/// Corner positions of a square of the given side
///
/// Ordered top-left, top-right, bottom-left, bottom-right.
pub fn corner_positions(side: f64) -> [[f64; 2]; CORNER_COUNT] {
    [[0.0, 0.0], [side, 0.0], [0.0, side], [side, side]]
}

/// Normalized inverse-distance weights of the four corners at a pixel
///
/// The returned weights are ordered like [`corner_positions`] and sum to one.
pub fn corner_weights(px: f64, py: f64, side: f64) -> [f64; CORNER_COUNT] {
    let mut weights =
        corner_positions(side).map(|[cx, cy]| 1.0 / (distance_2d(px, py, cx, cy) + 1.0));
    let total: f64 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= total;
    }
    weights
}

/// Weighted sum of the corner colors, computed independently per channel
///
/// No clamping is applied; with normalized weights the result is a convex
/// combination of the inputs.
pub fn blend_corners(colors: &[Color; CORNER_COUNT], weights: &[f64; CORNER_COUNT]) -> Color {
    let mut blended = [0.0; 4];
    for (color, weight) in colors.iter().zip(weights) {
        for (channel, value) in blended.iter_mut().zip(color) {
            *channel = value.mul_add(*weight, *channel);
        }
    }
    blended
}
