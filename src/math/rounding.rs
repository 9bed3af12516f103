//! Rounding used for every tile size and position computation
//!
//! Exact halves round toward positive infinity, so placements centred on a
//! half pixel drift consistently right and down regardless of sign.

/// Round to the nearest integer, sending exact halves toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to the nearest integer and convert to `i64`
///
/// Values beyond the `i64` range saturate; NaN maps to zero.
pub fn round_to_i64(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Round to the nearest integer and convert to `u32`
///
/// Negative values and NaN map to zero; values beyond `u32::MAX` saturate.
pub fn round_to_u32(value: f64) -> u32 {
    round_half_up(value) as u32
}
