use glam::Vec2;

use crate::compute::ComputeBackend;
use crate::particles::physics::ObstacleSampler;
use crate::particles::{ParticleState, PositionIntegrator, VelocityIntegrator};

/// One full update cycle.
///
/// The velocity pass writes next velocities, the position pass consumes
/// them, and only then does the state flip. Both passes write into the
/// slot that is not current.
pub fn update_particles(
    backend: &ComputeBackend,
    state: &mut ParticleState,
    obstacles: &impl ObstacleSampler,
    velocity: &VelocityIntegrator,
    position: &PositionIntegrator,
    acceleration: Vec2,
    dt: f32,
) {
    velocity.run(backend, state.velocity_pass_io(), obstacles, acceleration, dt);
    position.run(backend, state.position_pass_io(), obstacles, dt);
    state.swap();
}
