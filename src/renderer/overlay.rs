use glam::{Vec2, Vec4};

use crate::codec::decode_normal;
use crate::compute::{ColorBuffer, ComputeBackend};
use crate::constants::physics::OBSTACLE_THRESHOLD_SQ;
use crate::constants::render::OBSTACLE_COLOR;
use crate::obstacles::ObstacleField;

/// Paints obstacle cells over the finished frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ObstacleOverlay {
    pub display_normals: bool,
}

impl ObstacleOverlay {
    pub fn new(display_normals: bool) -> Self {
        Self { display_normals }
    }

    /// Pixels outside obstacles keep what is already in `target`
    pub fn draw(&self, backend: &ComputeBackend, target: &mut ColorBuffer, obstacles: &ObstacleField) {
        let size = Vec2::new(target.width() as f32, target.height() as f32);
        let display_normals = self.display_normals;

        backend.dispatch_color_overlay(target, |x, y| {
            let uv = (Vec2::new(x as f32, y as f32) + 0.5) / size;
            let channels = obstacles.mobile_layer().sample(uv);
            if decode_normal(channels).length_squared() < OBSTACLE_THRESHOLD_SQ {
                return None;
            }
            // normals view shows the stored 0.5n + 0.5 channels
            Some(if display_normals {
                Vec4::new(channels.x, channels.y, 0.0, 1.0)
            } else {
                Vec4::from(OBSTACLE_COLOR)
            })
        });
    }
}
