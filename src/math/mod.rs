//! Mathematical utilities for tile synthesis

/// Euclidean distance between points
pub mod distance;
/// Rounding with half-up tie breaking
pub mod rounding;
/// Inverse-distance corner weighting for gradient interpolation
pub mod weights;
