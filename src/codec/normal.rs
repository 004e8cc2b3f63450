use glam::{Vec2, Vec4};

use super::Texel;

/// Store a unit-range vector in the red and green channels.
pub fn encode_normal(normal: Vec2) -> Texel {
    let to_byte = |c: f32| ((0.5 * c + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8;
    Texel::new(to_byte(normal.x), to_byte(normal.y), 0, 255)
}

/// Inverse of [`encode_normal`] on normalized channels (`2c - 1`).
pub fn decode_normal(channels: Vec4) -> Vec2 {
    Vec2::new(2.0 * channels.x - 1.0, 2.0 * channels.y - 1.0)
}
