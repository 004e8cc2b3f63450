//! Particle fluid simulation on data-parallel texture passes.
//!
//! Particle positions and velocities live in 8-bit RGBA grids using a
//! 16-bit fixed-point encoding, are advanced by per-cell velocity and
//! position passes against a painted obstacle field, and are rendered either
//! as points or as a blurred, thresholded liquid surface.

pub mod codec;
pub mod compute;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod obstacles;
pub mod particles;
pub mod renderer;
pub mod simulation;
pub mod time;

pub use codec::{FixedPointCodec, Texel};
pub use compute::{BackendCapabilities, ColorBuffer, ComputeBackend, Texture};
pub use config::SimulationConfig;
pub use error::{ConfigError, SimulationError, SimulationResult};
pub use obstacles::{Brush, ObstacleField};
pub use particles::{ObstacleSampler, ParticleState, ParticleSystem, WorldParameters};
pub use renderer::{save_screenshot, Compositor, FluidSettings, RenderMode};
pub use simulation::Simulation;
pub use time::FrameClock;
