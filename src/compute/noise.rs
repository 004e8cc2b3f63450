use glam::Vec2;

/// Deterministic per-cell pseudo random value in [0,1).
///
/// Kernels hash their own inputs instead of sharing an RNG, so a pass stays
/// a pure function of the cell it writes.
pub fn hash_noise(co: Vec2) -> f32 {
    let x = co.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453;
    let r = x - x.floor();
    // guard against rounding up to exactly 1.0
    if r >= 1.0 {
        0.0
    } else {
        r
    }
}
