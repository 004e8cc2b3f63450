use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::ComputeBackend;
use crate::constants::physics::DEFAULT_ACCELERATION;
use crate::error::SimulationResult;
use crate::particles::physics::ObstacleSampler;
use crate::particles::update::update_particles;
use crate::particles::{ParticleState, PositionIntegrator, VelocityIntegrator, WorldParameters};

/// Particle state plus the passes and settings that advance it
pub struct ParticleSystem {
    state: ParticleState,
    world: WorldParameters,
    velocity: VelocityIntegrator,
    position: PositionIntegrator,
    acceleration: Vec2,
    speed: f32,
    rng: StdRng,
}

impl ParticleSystem {
    /// Random particles on a `width` x `height` grid. A seed makes the
    /// initial state reproducible.
    pub fn new(world: WorldParameters, width: u32, height: u32, seed: Option<u64>) -> SimulationResult<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = ParticleState::new(width, height, &mut rng)?;
        Ok(Self::with_state(world, state, rng))
    }

    /// Wrap an existing state
    pub fn from_state(world: WorldParameters, state: ParticleState) -> Self {
        Self::with_state(world, state, StdRng::from_entropy())
    }

    fn with_state(world: WorldParameters, state: ParticleState, rng: StdRng) -> Self {
        Self {
            state,
            world,
            velocity: VelocityIntegrator::new(world),
            position: PositionIntegrator::new(world),
            acceleration: Vec2::from(DEFAULT_ACCELERATION),
            speed: 1.0,
            rng,
        }
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn world(&self) -> &WorldParameters {
        &self.world
    }

    pub fn particle_count(&self) -> usize {
        self.state.particle_count()
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Time multiplier applied to every step. Negative values are clamped
    /// to zero so time never runs backwards.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// New random particles on a different grid
    pub fn reset(&mut self, width: u32, height: u32) -> SimulationResult<()> {
        self.state.reset(width, height, &mut self.rng)
    }

    /// Advance by `dt` seconds of simulated time (before the speed multiplier)
    pub fn update(&mut self, backend: &ComputeBackend, obstacles: &impl ObstacleSampler, dt: f32) {
        update_particles(
            backend,
            &mut self.state,
            obstacles,
            &self.velocity,
            &self.position,
            self.acceleration,
            self.speed * dt,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::physics::NoObstacles;

    #[test]
    fn test_seeded_systems_match() {
        let world = WorldParameters::new(64.0, 64.0);
        let a = ParticleSystem::new(world, 4, 4, Some(11)).unwrap();
        let b = ParticleSystem::new(world, 4, 4, Some(11)).unwrap();
        assert_eq!(a.state().current_position(), b.state().current_position());
        assert_eq!(a.state().current_velocity(), b.state().current_velocity());
    }

    #[test]
    fn test_speed_scales_timestep() {
        let backend = ComputeBackend::new(Some(1)).unwrap();
        let world = WorldParameters::new(100.0, 100.0);
        let state = ParticleState::from_fn(1, 1, &world, |_, _| (Vec2::ZERO, Vec2::new(10.0, 0.0))).unwrap();
        let mut system = ParticleSystem::from_state(world, state);
        system.set_acceleration(Vec2::ZERO);
        system.set_speed(2.0);

        system.update(&backend, &NoObstacles, 0.1);
        let (p, _) = system.state().decode_current(&world)[0];
        assert!((p.x - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_negative_speed_freezes_time() {
        let backend = ComputeBackend::new(Some(1)).unwrap();
        let world = WorldParameters::new(100.0, 100.0);
        let state = ParticleState::from_fn(1, 1, &world, |_, _| (Vec2::ZERO, Vec2::new(10.0, 0.0))).unwrap();
        let mut system = ParticleSystem::from_state(world, state);
        system.set_acceleration(Vec2::ZERO);
        system.set_speed(-3.0);
        assert_eq!(system.speed(), 0.0);

        system.update(&backend, &NoObstacles, 0.1);
        let (p, _) = system.state().decode_current(&world)[0];
        assert!(p.x.abs() <= world.position_codec.precision());
    }

    #[test]
    fn test_reset_resizes() {
        let mut system = ParticleSystem::new(WorldParameters::new(64.0, 64.0), 4, 4, Some(3)).unwrap();
        system.reset(8, 2).unwrap();
        assert_eq!(system.particle_count(), 16);
        assert!(system.reset(0, 2).is_err());
    }
}
