//! CPU compute backend
//!
//! Grid buffers and the data-parallel dispatcher every simulation and
//! post-process pass runs on. A pass is a function applied independently to
//! each cell of an output grid; reads come from other, immutable grids.

pub mod backend;
pub mod color_buffer;
pub mod noise;
pub mod texture;

pub use backend::{BackendCapabilities, ComputeBackend};
pub use color_buffer::ColorBuffer;
pub use noise::hash_noise;
pub use texture::{Region, Texture};
