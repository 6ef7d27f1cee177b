/// Linearly interpolate between two values
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Cubic S-curve between `a` and `b`
///
/// Returns 0 at or below `a`, 1 at or above `b` and `t² (3 - 2t)` in between.
/// When `a == b` the curve collapses to a hard step at `a`; parameter
/// validation keeps the terrain pipeline from ever asking for that.
pub fn smooth_step(a: f32, b: f32, x: f32) -> f32 {
    if a == b {
        return if x < a { 0.0 } else { 1.0 };
    }
    let t = ((x - a) / (b - a)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Map a grid index onto [0, 1]
///
/// `resolution` must be at least 2.
pub fn normalized_index(index: usize, resolution: usize) -> f32 {
    index as f32 / (resolution - 1) as f32
}
