use glam::Vec2;

use crate::constants::physics::{BOUNCE_SPEED_FACTOR, OBSTACLE_THRESHOLD_SQ};

/// Read-only obstacle lookup used by the integrators
pub trait ObstacleSampler: Sync {
    /// Stored outward normal at normalized field coordinates
    fn normal_at(&self, uv: Vec2) -> Vec2;
}

/// Field without any obstacle
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstacles;

impl ObstacleSampler for NoObstacles {
    fn normal_at(&self, _uv: Vec2) -> Vec2 {
        Vec2::ZERO
    }
}

/// Whether a sampled normal marks an obstacle
pub fn is_obstacle(normal: Vec2) -> bool {
    normal.length_squared() > OBSTACLE_THRESHOLD_SQ
}

/// Damped bounce off an obstacle.
///
/// Only velocities heading into the surface are touched: they are mirrored
/// about the normal and capped to a fraction of `max_speed`.
pub fn resolve_collision(velocity: Vec2, normal: Vec2, max_speed: f32) -> Vec2 {
    if !is_obstacle(normal) || velocity.dot(normal) >= 0.0 {
        return velocity;
    }

    let n = normal.normalize();
    let reflected = velocity - 2.0 * velocity.dot(n) * n;
    reflected.clamp_length_max(BOUNCE_SPEED_FACTOR * max_speed)
}

/// Cap speed, keeping direction
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp_length_max(max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_turns_velocity_away() {
        let normal = Vec2::new(0.0, 1.0);
        let out = resolve_collision(Vec2::new(30.0, -200.0), normal, 100.0);
        assert!(out.dot(normal) >= 0.0);
        assert!(out.length() <= 10.0 + 1e-4);
    }

    #[test]
    fn test_collision_ignores_separating_velocity() {
        let normal = Vec2::new(1.0, 0.0);
        let v = Vec2::new(5.0, 3.0);
        assert_eq!(resolve_collision(v, normal, 100.0), v);
    }

    #[test]
    fn test_collision_ignores_free_space() {
        let v = Vec2::new(0.0, -50.0);
        assert_eq!(resolve_collision(v, Vec2::new(0.0, 0.2), 100.0), v);
    }

    #[test]
    fn test_clamp_speed_preserves_direction() {
        let v = clamp_speed(Vec2::new(300.0, 400.0), 50.0);
        assert!((v.length() - 50.0).abs() < 1e-3);
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }
}
