pub mod particle_state;
pub mod physics;
pub mod position;
pub mod system;
pub mod update;
pub mod velocity;
pub mod world;

pub use particle_state::{ParticleState, PositionPassIo, VelocityPassIo};
pub use physics::{NoObstacles, ObstacleSampler};
pub use position::PositionIntegrator;
pub use system::ParticleSystem;
pub use update::update_particles;
pub use velocity::VelocityIntegrator;
pub use world::WorldParameters;
