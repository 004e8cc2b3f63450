use glam::Vec2;
use rand::Rng;

use crate::codec::Texel;
use crate::compute::Texture;
use crate::error::{SimulationError, SimulationResult};
use crate::particles::WorldParameters;

/// Buffers read and written by the velocity pass
pub struct VelocityPassIo<'a> {
    pub position: &'a Texture,
    pub velocity: &'a Texture,
    pub next_velocity: &'a mut Texture,
}

/// Buffers read and written by the position pass
pub struct PositionPassIo<'a> {
    pub position: &'a Texture,
    pub next_velocity: &'a Texture,
    pub next_position: &'a mut Texture,
}

/// Double-buffered per-particle position and velocity.
///
/// Particle `i` lives in cell `(i % width, i / width)` of every buffer.
/// Only `swap` changes which slot is current.
pub struct ParticleState {
    width: u32,
    height: u32,
    positions: [Texture; 2],
    velocities: [Texture; 2],
    active: usize,
}

fn check_grid(width: u32, height: u32) -> SimulationResult<()> {
    if width == 0 || height == 0 {
        return Err(SimulationError::InvalidGrid { width, height });
    }
    Ok(())
}

/// Split a slot pair into (current, next)
fn split_slots(slots: &mut [Texture; 2], active: usize) -> (&Texture, &mut Texture) {
    let (first, second) = slots.split_at_mut(1);
    if active == 0 {
        (&first[0], &mut second[0])
    } else {
        (&second[0], &mut first[0])
    }
}

fn random_pair(width: u32, height: u32, rng: &mut impl Rng) -> [Texture; 2] {
    let texture = Texture::from_fn(width, height, |_, _| Texel(rng.gen()));
    [texture.clone(), texture]
}

impl ParticleState {
    /// Random positions and velocities over their whole encodable ranges
    pub fn new(width: u32, height: u32, rng: &mut impl Rng) -> SimulationResult<Self> {
        check_grid(width, height)?;
        Ok(Self {
            width,
            height,
            positions: random_pair(width, height, rng),
            velocities: random_pair(width, height, rng),
            active: 0,
        })
    }

    /// Explicit initial state, one `(position, velocity)` per cell
    pub fn from_fn(
        width: u32,
        height: u32,
        world: &WorldParameters,
        mut f: impl FnMut(u32, u32) -> (Vec2, Vec2),
    ) -> SimulationResult<Self> {
        check_grid(width, height)?;

        let mut position = Texture::new(width, height);
        let mut velocity = Texture::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let (p, v) = f(x, y);
                position.set(x, y, world.position_codec.encode_vec2(p));
                velocity.set(x, y, world.velocity_codec.encode_vec2(v));
            }
        }

        Ok(Self {
            width,
            height,
            positions: [position.clone(), position],
            velocities: [velocity.clone(), velocity],
            active: 0,
        })
    }

    /// Reallocate all four buffers with fresh random content
    pub fn reset(&mut self, width: u32, height: u32, rng: &mut impl Rng) -> SimulationResult<()> {
        *self = Self::new(width, height, rng)?;
        log::info!("[ParticleState::reset] {}x{} = {} particles", width, height, self.particle_count());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn particle_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current_position(&self) -> &Texture {
        &self.positions[self.active]
    }

    pub fn current_velocity(&self) -> &Texture {
        &self.velocities[self.active]
    }

    pub fn next_position(&self) -> &Texture {
        &self.positions[1 - self.active]
    }

    pub fn next_velocity(&self) -> &Texture {
        &self.velocities[1 - self.active]
    }

    pub(crate) fn velocity_pass_io(&mut self) -> VelocityPassIo<'_> {
        let position = &self.positions[self.active];
        let (velocity, next_velocity) = split_slots(&mut self.velocities, self.active);
        VelocityPassIo {
            position,
            velocity,
            next_velocity,
        }
    }

    pub(crate) fn position_pass_io(&mut self) -> PositionPassIo<'_> {
        let next_velocity = &self.velocities[1 - self.active];
        let (position, next_position) = split_slots(&mut self.positions, self.active);
        PositionPassIo {
            position,
            next_velocity,
            next_position,
        }
    }

    /// Make "next" current. Call once per update, after both passes.
    pub fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    /// Decoded current `(position, velocity)` of every particle
    pub fn decode_current(&self, world: &WorldParameters) -> Vec<(Vec2, Vec2)> {
        let positions = self.current_position().texels();
        let velocities = self.current_velocity().texels();
        positions
            .iter()
            .zip(velocities)
            .map(|(&p, &v)| {
                (
                    world.position_codec.decode_texel(p),
                    world.velocity_codec.decode_texel(v),
                )
            })
            .collect()
    }
}
