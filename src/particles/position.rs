use glam::Vec2;

use crate::compute::{hash_noise, ComputeBackend};
use crate::particles::particle_state::PositionPassIo;
use crate::particles::physics::{is_obstacle, ObstacleSampler};
use crate::particles::WorldParameters;

/// Computes next positions from current positions and next velocities
#[derive(Debug, Clone, Copy)]
pub struct PositionIntegrator {
    world: WorldParameters,
}

impl PositionIntegrator {
    pub fn new(world: WorldParameters) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &WorldParameters {
        &self.world
    }

    /// Next position of a single particle. `next_velocity` must already be
    /// this cycle's output of the velocity pass.
    pub fn integrate_cell(
        &self,
        position: Vec2,
        next_velocity: Vec2,
        obstacles: &impl ObstacleSampler,
        dt: f32,
    ) -> Vec2 {
        let world = &self.world;
        let mut next = position + dt * next_velocity;

        // push out of obstacles the bounce alone did not clear
        let normal = obstacles.normal_at(world.to_field_uv(next));
        if is_obstacle(normal) {
            next += dt * normal;
        }

        if world.is_below_world(position) {
            let size = world.world_size;
            let spread = world.position_bandwidth() - size.y;
            next.x = (hash_noise(position + next_velocity) - 0.5) * size.x;
            next.y += size.y + 0.5 * hash_noise(position) * spread;
            next.y = next.y.max(world.upper_bound());
        }

        next
    }

    /// Position pass over every particle
    pub fn run(
        &self,
        backend: &ComputeBackend,
        io: PositionPassIo<'_>,
        obstacles: &impl ObstacleSampler,
        dt: f32,
    ) {
        let world = &self.world;
        let position = io.position;
        let next_velocity = io.next_velocity;

        backend.dispatch(io.next_position, |x, y| {
            let p = world.position_codec.decode_texel(position.get(x, y));
            let v = world.velocity_codec.decode_texel(next_velocity.get(x, y));

            let next = self.integrate_cell(p, v, obstacles, dt);
            world.position_codec.encode_vec2(next)
        });
    }
}
