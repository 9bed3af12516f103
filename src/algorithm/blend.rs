//! Source-over alpha compositing

use image::{Rgba, RgbaImage};

/// Blend one source pixel over a destination pixel
///
/// The source alpha is multiplied by `opacity` before blending. A result
/// with no coverage is transparent black.
pub fn blend_source_over(source: Rgba<u8>, destination: Rgba<u8>, opacity: f64) -> Rgba<u8> {
    let Rgba([sr, sg, sb, sa]) = source;
    let Rgba([dr, dg, db, da]) = destination;

    let source_alpha = f64::from(sa) / 255.0 * opacity;
    let destination_alpha = f64::from(da) / 255.0;
    let alpha = destination_alpha.mul_add(-source_alpha, destination_alpha + source_alpha);
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let destination_share = destination_alpha * (1.0 - source_alpha);
    let mix = |s: u8, d: u8| {
        let value = f64::from(s).mul_add(source_alpha, f64::from(d) * destination_share) / alpha;
        value.round() as u8
    };

    Rgba([
        mix(sr, dr),
        mix(sg, dg),
        mix(sb, db),
        (alpha * 255.0).round() as u8,
    ])
}

/// Composite `tile` onto `canvas` with its upper-left corner at `(x, y)`
///
/// The offset may be negative; tile pixels landing outside the canvas are
/// dropped.
pub fn composite_over(canvas: &mut RgbaImage, tile: &RgbaImage, x: i64, y: i64, opacity: f64) {
    for (tx, ty, &pixel) in tile.enumerate_pixels() {
        let (Ok(cx), Ok(cy)) = (
            u32::try_from(x + i64::from(tx)),
            u32::try_from(y + i64::from(ty)),
        ) else {
            continue;
        };
        if let Some(target) = canvas.get_pixel_mut_checked(cx, cy) {
            *target = blend_source_over(pixel, *target, opacity);
        }
    }
}
