use glam::Vec2;

use crate::compute::{hash_noise, ComputeBackend};
use crate::constants::physics::RESPAWN_SPREAD_FACTOR;
use crate::particles::particle_state::VelocityPassIo;
use crate::particles::physics::{clamp_speed, resolve_collision, ObstacleSampler};
use crate::particles::WorldParameters;

/// Computes next velocities from current state, acceleration and obstacles
#[derive(Debug, Clone, Copy)]
pub struct VelocityIntegrator {
    world: WorldParameters,
}

impl VelocityIntegrator {
    pub fn new(world: WorldParameters) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &WorldParameters {
        &self.world
    }

    /// Next velocity of a single particle. `normal` is the obstacle normal
    /// sampled at `position`.
    pub fn integrate_cell(
        &self,
        position: Vec2,
        velocity: Vec2,
        normal: Vec2,
        acceleration: Vec2,
        dt: f32,
    ) -> Vec2 {
        let max_speed = self.world.max_speed;
        let mut next = velocity + dt * acceleration;

        if self.world.is_below_world(position) {
            next = Vec2::new(
                RESPAWN_SPREAD_FACTOR * max_speed * (2.0 * hash_noise(100.0 * position) - 1.0),
                hash_noise(position + velocity),
            );
        }

        let next = resolve_collision(next, normal, max_speed);
        clamp_speed(next, max_speed)
    }

    /// Velocity pass over every particle
    pub fn run(
        &self,
        backend: &ComputeBackend,
        io: VelocityPassIo<'_>,
        obstacles: &impl ObstacleSampler,
        acceleration: Vec2,
        dt: f32,
    ) {
        let world = &self.world;
        let position = io.position;
        let velocity = io.velocity;

        backend.dispatch(io.next_velocity, |x, y| {
            let p = world.position_codec.decode_texel(position.get(x, y));
            let v = world.velocity_codec.decode_texel(velocity.get(x, y));
            let normal = obstacles.normal_at(world.to_field_uv(p));

            let next = self.integrate_cell(p, v, normal, acceleration, dt);
            world.velocity_codec.encode_vec2(next)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrator() -> VelocityIntegrator {
        VelocityIntegrator::new(WorldParameters::new(200.0, 200.0))
    }

    #[test]
    fn test_acceleration_applied() {
        let v = integrator().integrate_cell(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::ZERO, Vec2::new(0.0, -10.0), 0.1);
        assert!((v - Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_speed_capped() {
        let integrator = integrator();
        let v = integrator.integrate_cell(Vec2::ZERO, Vec2::new(500.0, 500.0), Vec2::ZERO, Vec2::ZERO, 0.1);
        assert!(v.length() <= integrator.world().max_speed + 1e-3);
    }

    #[test]
    fn test_collision_bounces_out_of_obstacle() {
        let integrator = integrator();
        let normal = Vec2::new(-0.6, 0.8);
        let v = integrator.integrate_cell(Vec2::ZERO, Vec2::new(20.0, -90.0), normal, Vec2::new(0.0, -100.0), 0.05);
        assert!(v.dot(normal) >= 0.0);
        assert!(v.length() <= integrator.world().max_speed);
    }

    #[test]
    fn test_respawn_reseeds_velocity() {
        let integrator = integrator();
        let max_speed = integrator.world().max_speed;
        for i in 0..50 {
            let p = Vec2::new(i as f32 * 3.0 - 75.0, -101.0 - i as f32);
            let v = integrator.integrate_cell(p, Vec2::new(0.0, -99.0), Vec2::ZERO, Vec2::new(0.0, -100.0), 0.1);
            assert!(v.x.abs() <= RESPAWN_SPREAD_FACTOR * max_speed);
            assert!((0.0..1.0).contains(&v.y));
        }
    }
}
