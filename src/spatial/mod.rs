//! Spatial primitives shared by sampling and compositing
//!
//! This module contains:
//! - Rectangular regions and their clamping to image bounds
//! - Random tile placement generation

/// Random square tile placements
pub mod placement;
/// Rectangular regions in image coordinate space
pub mod region;

pub use placement::TilePlacement;
pub use region::{ClampedRegion, Region};
