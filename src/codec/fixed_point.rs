use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::constants::codec::QUANT_LEVELS;

/// One RGBA8 element of a texture grid
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Texel(pub [u8; 4]);

impl Texel {
    pub const ZERO: Texel = Texel([0; 4]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Texel([r, g, b, a])
    }

    /// Channels normalized to [0,1], as a sampler would return them
    pub fn to_vec4(self) -> Vec4 {
        let [r, g, b, a] = self.0;
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}

/// Quantize a normalized scalar into (octave, remainder) bytes.
///
/// The input is clamped to [0,1] and mapped onto 65536 levels.
pub fn encode_unit(x: f32) -> [u8; 2] {
    let q = (x.clamp(0.0, 1.0) * QUANT_LEVELS).round() as u32;
    [(q >> 8) as u8, (q & 0xFF) as u8]
}

/// Rebuild a normalized scalar from two channels given in [0,1].
///
/// Channels are clamped first so filtered samples never leave the range.
pub fn decode_unit(hi: f32, lo: f32) -> f32 {
    let hi = hi.clamp(0.0, 1.0);
    let lo = lo.clamp(0.0, 1.0);
    255.0 * (hi * 256.0 + lo) / QUANT_LEVELS
}

/// Codec for values bounded to `[-bandwidth/2, bandwidth/2]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointCodec {
    bandwidth: f32,
}

impl FixedPointCodec {
    pub fn new(bandwidth: f32) -> Self {
        Self { bandwidth }
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Smallest representable step
    pub fn precision(&self) -> f32 {
        self.bandwidth / QUANT_LEVELS
    }

    pub fn encode(&self, value: f32) -> [u8; 2] {
        let half = 0.5 * self.bandwidth;
        let value = value.clamp(-half, half);
        encode_unit(value / self.bandwidth + 0.5)
    }

    pub fn decode(&self, hi: f32, lo: f32) -> f32 {
        self.bandwidth * (decode_unit(hi, lo) - 0.5)
    }

    /// Pack a vector: x in (r,g), y in (b,a)
    pub fn encode_vec2(&self, value: Vec2) -> Texel {
        let [xh, xl] = self.encode(value.x);
        let [yh, yl] = self.encode(value.y);
        Texel([xh, xl, yh, yl])
    }

    /// Unpack a vector from normalized (possibly filtered) channels
    pub fn decode_vec2(&self, channels: Vec4) -> Vec2 {
        Vec2::new(
            self.decode(channels.x, channels.y),
            self.decode(channels.z, channels.w),
        )
    }

    pub fn decode_texel(&self, texel: Texel) -> Vec2 {
        self.decode_vec2(texel.to_vec4())
    }
}
