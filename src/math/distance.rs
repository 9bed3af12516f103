//! Euclidean distance helpers

/// Euclidean distance between two points of arbitrary dimension
///
/// Coordinates are paired up component by component; surplus components of
/// the longer slice are ignored.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| (p - q).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Euclidean distance between two points in the plane
pub fn distance_2d(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx.hypot(dy)
}
