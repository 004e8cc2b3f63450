use glam::{Vec2, Vec4};

use crate::compute::ColorBuffer;
use crate::constants::render::{FAST_COLOR, SLOW_COLOR, SPEED_DEPTH_SCALE};
use crate::particles::{ParticleState, WorldParameters};
use crate::renderer::smoothstep;

/// Rasterizes particles as round points, colored by speed
pub struct PointRenderer {
    point_size: f32,
    depth: Vec<f32>,
}

/// Color and depth of a particle moving at `relative_speed` (|v| / max)
pub fn point_style(relative_speed: f32) -> (Vec4, f32) {
    let t = smoothstep(0.0, 1.0, relative_speed);
    let color = Vec4::from(SLOW_COLOR).lerp(Vec4::from(FAST_COLOR), t);
    (color, SPEED_DEPTH_SCALE * relative_speed)
}

impl PointRenderer {
    pub fn new(point_size: f32) -> Self {
        Self {
            point_size,
            depth: Vec::new(),
        }
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Point diameter in pixels
    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = size.max(0.0);
    }

    /// Draw every particle of the current state into `target`.
    ///
    /// Nearer depth wins, so slow particles cover fast ones. Points whose
    /// depth falls outside the clip range are skipped.
    pub fn draw(&mut self, target: &mut ColorBuffer, state: &ParticleState, world: &WorldParameters) {
        let (width, height) = (target.width(), target.height());
        self.depth.clear();
        self.depth.resize((width * height) as usize, 1.0);

        let viewport = Vec2::new(width as f32, height as f32);
        let half_size = 0.5 * self.point_size;

        let positions = state.current_position().texels();
        let velocities = state.current_velocity().texels();
        for (&p, &v) in positions.iter().zip(velocities) {
            let position = world.position_codec.decode_texel(p);
            let velocity = world.velocity_codec.decode_texel(v);

            let (color, clip_z) = point_style(velocity.length() / world.max_speed);
            if !(-1.0..=1.0).contains(&clip_z) {
                continue;
            }
            let depth = 0.5 * clip_z + 0.5;

            let center = world.to_field_uv(position) * viewport;
            let x0 = (center.x - half_size).floor().max(0.0) as i64;
            let x1 = (center.x + half_size).ceil().min(viewport.x) as i64;
            let y0 = (center.y - half_size).floor().max(0.0) as i64;
            let y1 = (center.y + half_size).ceil().min(viewport.y) as i64;

            for py in y0..y1 {
                for px in x0..x1 {
                    let pixel = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                    let to_center = 2.0 * (pixel - center) / self.point_size;
                    if to_center.length_squared() > 1.0 {
                        continue;
                    }

                    let idx = (py as u32 * width + px as u32) as usize;
                    if depth < self.depth[idx] {
                        self.depth[idx] = depth;
                        target.pixels[idx] = color;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_endpoints() {
        let (slow, slow_depth) = point_style(0.0);
        let (fast, fast_depth) = point_style(1.0);
        assert!((slow - Vec4::from(SLOW_COLOR)).abs().max_element() < 1e-6);
        assert!((fast - Vec4::from(FAST_COLOR)).abs().max_element() < 1e-6);
        assert!(slow_depth < fast_depth);
    }

    #[test]
    fn test_point_drawn_at_center() {
        let world = WorldParameters::new(20.0, 20.0);
        let state = ParticleState::from_fn(1, 1, &world, |_, _| (Vec2::ZERO, Vec2::ZERO)).unwrap();
        let mut target = ColorBuffer::new(20, 20);
        let mut renderer = PointRenderer::new(4.0);
        renderer.draw(&mut target, &state, &world);

        assert!((target.get(10, 10) - Vec4::from(SLOW_COLOR)).abs().max_element() < 1e-4);
        assert_eq!(target.get(0, 0), Vec4::ZERO);
        let covered = target.opaque_count();
        assert!(covered > 4 && covered <= 16);
    }

    #[test]
    fn test_slow_particle_wins_depth() {
        let world = WorldParameters::new(20.0, 20.0);
        let state = ParticleState::from_fn(2, 1, &world, |x, _| {
            let speed = if x == 0 { 9.0 } else { 0.0 };
            (Vec2::ZERO, Vec2::new(speed, 0.0))
        })
        .unwrap();
        let mut target = ColorBuffer::new(20, 20);
        PointRenderer::new(3.0).draw(&mut target, &state, &world);
        assert!((target.get(10, 10) - Vec4::from(SLOW_COLOR)).abs().max_element() < 1e-4);
    }
}
