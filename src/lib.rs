//! Stochastic gradient tile mosaics of raster images
//!
//! A source image is sampled in square regions whose four quadrant averages
//! become the corner colors of smooth gradient tiles. Many such tiles, placed
//! and sized at random, are alpha-composited over one full-canvas background
//! tile to produce a soft, mosaic-like rendition of the source.

#![forbid(unsafe_code)]

/// Region averaging, tile synthesis, compositing and mosaic orchestration
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Mathematical utilities for distances, rounding and corner weighting
pub mod math;
/// Regions and tile placements in image coordinate space
pub mod spatial;

pub use algorithm::compositor::{MosaicCompositor, TileObserver, render_mosaic};
pub use io::configuration::MosaicConfig;
pub use io::error::{MosaicError, Result};
