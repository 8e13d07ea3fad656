/// Order two corners so the first is top-left and the second bottom-right.
pub(crate) fn sort_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, i32, i32) {
    (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

/// Smallest odd integer `>= max(size, 1)`.
pub(crate) fn next_odd(size: usize) -> usize {
    if size == 0 { 1 } else { size | 1 }
}

/// Round and clamp a float channel value into `u8`.
pub(crate) fn clamp_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
