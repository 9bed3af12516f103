//! Mosaic assembly from a background tile and many random gradient tiles
//!
//! A run allocates a scaled canvas, covers it with one opaque background tile
//! and then paints the random tiles strictly in generation order. Tiles are
//! synthesized in parallel batches, but merging onto the canvas is sequential
//! so later tiles always land on top of earlier ones.

use crate::algorithm::blend::composite_over;
use crate::algorithm::gradient::{TilePatch, quadrant_colors, visible_patch};
use crate::io::configuration::{MAX_CANVAS_DIMENSION, MosaicConfig, SYNTHESIS_BATCH_SIZE};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::rounding::{round_half_up, round_to_i64};
use crate::spatial::placement::{TilePlacement, generate_placements};
use crate::spatial::region::Region;
use image::RgbaImage;
use log::debug;
use rand::Rng;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Receives one notification per composited random tile
pub trait TileObserver {
    /// Called after the `completed`-th of `total` tiles reached the canvas
    fn tile_composited(&mut self, completed: usize, total: usize);
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl TileObserver for Silent {
    fn tile_composited(&mut self, _completed: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> TileObserver for F {
    fn tile_composited(&mut self, completed: usize, total: usize) {
        self(completed, total);
    }
}

/// Canvas size for a source image at the given scale
///
/// # Errors
///
/// Returns `InvalidParameter` for `scale` if either rounded dimension is zero
/// or exceeds [`MAX_CANVAS_DIMENSION`]
pub fn canvas_dimensions(source_width: u32, source_height: u32, scale: f64) -> Result<(u32, u32)> {
    let width = round_half_up(f64::from(source_width) * scale);
    let height = round_half_up(f64::from(source_height) * scale);
    let limit = f64::from(MAX_CANVAS_DIMENSION);

    if !((1.0..=limit).contains(&width) && (1.0..=limit).contains(&height)) {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!(
                "produces a {width}x{height} canvas; each side must be between 1 and {MAX_CANVAS_DIMENSION}"
            ),
        ));
    }

    Ok((width as u32, height as u32))
}

/// Square covering the larger canvas dimension, centred on the canvas
///
/// The same offset doubles as the sampling origin in source coordinates, so
/// at scales other than one the sampled area and the painted area differ.
pub fn background_region(canvas_width: u32, canvas_height: u32) -> Region {
    let side = canvas_width.max(canvas_height);
    let half_side = f64::from(side) / 2.0;
    let x = round_to_i64(f64::from(canvas_width) / 2.0 - half_side);
    let y = round_to_i64(f64::from(canvas_height) / 2.0 - half_side);
    Region::square(x, y, i64::from(side))
}

/// Paint the opaque background tile onto the canvas
pub fn paint_background(source: &RgbaImage, canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let region = background_region(width, height);
    let colors = quadrant_colors(source, region);
    let side = width.max(height);
    if let Some(patch) = visible_patch(&colors, side, region.x, region.y, width, height) {
        paint_patch(canvas, &patch, 1.0);
    }
}

/// Synthesize the canvas-visible part of one random tile
///
/// The tile samples its placement's region of the source and is drawn at the
/// unscaled placement origin with a scaled side.
pub fn synthesize_tile(
    source: &RgbaImage,
    placement: &TilePlacement,
    scale: f64,
    canvas_width: u32,
    canvas_height: u32,
) -> Option<TilePatch> {
    let colors = quadrant_colors(source, placement.region());
    visible_patch(
        &colors,
        placement.output_side(scale),
        placement.x,
        placement.y,
        canvas_width,
        canvas_height,
    )
}

fn paint_patch(canvas: &mut RgbaImage, patch: &TilePatch, opacity: f64) {
    composite_over(
        canvas,
        &patch.image,
        i64::from(patch.x),
        i64::from(patch.y),
        opacity,
    );
}

/// Stateful mosaic run over a borrowed source image
pub struct MosaicCompositor<'a> {
    source: &'a RgbaImage,
    config: MosaicConfig,
    canvas: RgbaImage,
    placements: Vec<TilePlacement>,
    composited: usize,
}

impl<'a> MosaicCompositor<'a> {
    /// Validate the configuration, paint the background and draw all placements
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any configuration value is out of its domain
    /// - The scaled canvas would be empty or too large
    /// - The source image has no pixels
    pub fn new<R: Rng + ?Sized>(
        source: &'a RgbaImage,
        config: MosaicConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        if source.width() == 0 || source.height() == 0 {
            return Err(MosaicError::EmptySource {
                width: source.width(),
                height: source.height(),
            });
        }

        let (width, height) = canvas_dimensions(source.width(), source.height(), config.scale)?;
        let mut canvas = RgbaImage::new(width, height);
        paint_background(source, &mut canvas);

        let placements = generate_placements(
            rng,
            source.width(),
            source.height(),
            config.iterations,
            config.blur,
        );
        debug!(
            "canvas {width}x{height} from {}x{} source, {} tiles queued",
            source.width(),
            source.height(),
            placements.len()
        );

        Ok(Self {
            source,
            config,
            canvas,
            placements,
            composited: 0,
        })
    }

    /// Canvas in its current state
    pub const fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// All tile placements in painting order
    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }

    /// Number of random tiles already composited
    pub const fn composited(&self) -> usize {
        self.composited
    }

    /// Whether every random tile has been composited
    pub fn is_finished(&self) -> bool {
        self.composited >= self.placements.len()
    }

    /// Synthesize and composite the next tile on the calling thread
    ///
    /// Returns the placement that was painted, or `None` once finished.
    pub fn composite_next(&mut self) -> Option<TilePlacement> {
        let placement = *self.placements.get(self.composited)?;
        let (width, height) = self.canvas.dimensions();
        if let Some(patch) =
            synthesize_tile(self.source, &placement, self.config.scale, width, height)
        {
            paint_patch(&mut self.canvas, &patch, self.config.opacity);
        }
        self.composited += 1;
        Some(placement)
    }

    /// Synthesize up to `max_tiles` tiles in parallel, then merge them in order
    ///
    /// Returns the number of tiles composited by this call.
    pub fn composite_batch<O: TileObserver + ?Sized>(
        &mut self,
        max_tiles: usize,
        observer: &mut O,
    ) -> usize {
        let total = self.placements.len();
        let start = self.composited.min(total);
        let end = start.saturating_add(max_tiles).min(total);
        let Some(batch) = self.placements.get(start..end) else {
            return 0;
        };

        let source = self.source;
        let scale = self.config.scale;
        let (width, height) = self.canvas.dimensions();
        let patches: Vec<Option<TilePatch>> = batch
            .par_iter()
            .map(|placement| synthesize_tile(source, placement, scale, width, height))
            .collect();

        for patch in &patches {
            if let Some(patch) = patch {
                paint_patch(&mut self.canvas, patch, self.config.opacity);
            }
            self.composited += 1;
            observer.tile_composited(self.composited, total);
        }

        batch.len()
    }

    /// Composite all remaining tiles and return the finished canvas
    pub fn run<O: TileObserver + ?Sized>(mut self, observer: &mut O) -> RgbaImage {
        while !self.is_finished() {
            let painted = self.composite_batch(SYNTHESIS_BATCH_SIZE, observer);
            debug!(
                "merged {painted} tiles ({}/{})",
                self.composited,
                self.placements.len()
            );
        }
        self.canvas
    }

    /// Stop painting and hand over the canvas as it is
    pub fn finish(self) -> RgbaImage {
        self.canvas
    }
}

/// Render a complete mosaic of `source`
///
/// # Errors
///
/// Returns an error if the configuration or the source image is rejected by
/// [`MosaicCompositor::new`]
pub fn render_mosaic<R: Rng + ?Sized, O: TileObserver + ?Sized>(
    source: &RgbaImage,
    config: &MosaicConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<RgbaImage> {
    Ok(MosaicCompositor::new(source, *config, rng)?.run(observer))
}
