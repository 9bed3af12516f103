//! Mean RGBA color of a rectangular image region
//!
//! The region is clamped to the image first. A clamped region with no extent
//! falls back to the single pixel at its clamped origin, so every call samples
//! at least one pixel of a non-empty image.

use crate::math::weights::Color;
use crate::spatial::region::{ClampedRegion, Region};
use image::RgbaImage;

/// Compute the per-channel mean over the clamped region
///
/// Channels are returned in RGBA order on the 0-255 scale. An image without
/// pixels yields a fully transparent black color.
pub fn average_color(image: &RgbaImage, region: Region) -> Color {
    let Some(bounded) = region.clamp_to(image.width(), image.height()) else {
        return [0.0; 4];
    };

    let sampled = if bounded.is_empty() {
        ClampedRegion {
            width: 1,
            height: 1,
            ..bounded
        }
    } else {
        bounded
    };

    let mut sums = [0.0_f64; 4];
    let mut count = 0_u64;
    for (x, y) in sampled.pixels() {
        if let Some(pixel) = image.get_pixel_checked(x, y) {
            for (sum, &channel) in sums.iter_mut().zip(&pixel.0) {
                *sum += f64::from(channel);
            }
            count += 1;
        }
    }

    if count == 0 {
        return sums;
    }
    let count = count as f64;
    sums.map(|sum| sum / count)
}
