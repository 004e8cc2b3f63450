use glam::Vec2;

use crate::codec::FixedPointCodec;
use crate::constants::world::{MAX_SPEED_FACTOR, POSITION_BANDWIDTH_FACTOR};

/// Constants derived once from the world extents.
///
/// Every pass that touches the same particle buffers must use the same
/// instance, otherwise positions and velocities decode inconsistently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParameters {
    pub world_size: Vec2,
    pub max_speed: f32,
    pub position_codec: FixedPointCodec,
    pub velocity_codec: FixedPointCodec,
}

impl WorldParameters {
    pub fn new(width: f32, height: f32) -> Self {
        let max_speed = MAX_SPEED_FACTOR * width.min(height);
        let position_bandwidth = POSITION_BANDWIDTH_FACTOR * width.max(height);

        Self {
            world_size: Vec2::new(width, height),
            max_speed,
            position_codec: FixedPointCodec::new(position_bandwidth),
            velocity_codec: FixedPointCodec::new(2.0 * max_speed),
        }
    }

    pub fn position_bandwidth(&self) -> f32 {
        self.position_codec.bandwidth()
    }

    pub fn lower_bound(&self) -> f32 {
        -0.5 * self.world_size.y
    }

    pub fn upper_bound(&self) -> f32 {
        0.5 * self.world_size.y
    }

    /// Particle fell out through the bottom of the visible domain
    pub fn is_below_world(&self, position: Vec2) -> bool {
        position.y < self.lower_bound()
    }

    /// World position to normalized field coordinates
    pub fn to_field_uv(&self, position: Vec2) -> Vec2 {
        position / self.world_size + 0.5
    }
}
