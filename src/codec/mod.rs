//! Fixed-precision encodings for texel-resident state.
//!
//! Continuous values live in RGBA8 texels: a bounded scalar takes two 8-bit
//! channels, a 2D vector takes a whole texel. Obstacle normals use a cheaper
//! one-channel-per-axis mapping.

pub mod fixed_point;
pub mod normal;

pub use fixed_point::{decode_unit, encode_unit, FixedPointCodec, Texel};
pub use normal::{decode_normal, encode_normal};
