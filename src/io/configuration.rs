//! Rendering constants and the run configuration record

use crate::io::error::{Result, invalid_parameter};

// Default values for configurable parameters
/// Number of random tiles painted over the background
pub const DEFAULT_ITERATIONS: usize = 1000;
/// Opacity applied to every random tile
pub const DEFAULT_OPACITY: f64 = 0.5;
/// Output size relative to the source image
pub const DEFAULT_SCALE: f64 = 1.0;
/// Divisor of the mean image dimension giving the base tile size
pub const DEFAULT_BLUR: f64 = 8.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas dimension in pixels
pub const MAX_CANVAS_DIMENSION: u32 = 32_768;

/// Number of tiles synthesized in parallel before merging onto the canvas
pub const SYNTHESIS_BATCH_SIZE: usize = 32;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Prefix added to output filenames
pub const OUTPUT_PREFIX: &str = "TILED";

/// Options controlling a single mosaic run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Number of random tiles to paint
    pub iterations: usize,
    /// Opacity of each random tile, between 0 and 1
    pub opacity: f64,
    /// Output size multiplier relative to the source
    pub scale: f64,
    /// Inverse tile size control; larger values give smaller tiles
    pub blur: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            opacity: DEFAULT_OPACITY,
            scale: DEFAULT_SCALE,
            blur: DEFAULT_BLUR,
        }
    }
}

impl MosaicConfig {
    /// Check every option against its valid domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `iterations` is zero
    /// - `opacity` is not a finite value in `[0, 1]`
    /// - `scale` or `blur` is not a finite positive value
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(invalid_parameter(
                "iterations",
                &self.iterations,
                &"must be a positive integer",
            ));
        }
        if !(self.opacity.is_finite() && (0.0..=1.0).contains(&self.opacity)) {
            return Err(invalid_parameter(
                "opacity",
                &self.opacity,
                &"must be between 0 and 1",
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid_parameter(
                "scale",
                &self.scale,
                &"must be a positive number",
            ));
        }
        if !(self.blur.is_finite() && self.blur > 0.0) {
            return Err(invalid_parameter(
                "blur",
                &self.blur,
                &"must be a positive number",
            ));
        }
        Ok(())
    }
}
