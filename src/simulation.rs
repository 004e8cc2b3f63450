use glam::Vec2;

use crate::compute::{ColorBuffer, ComputeBackend};
use crate::config::SimulationConfig;
use crate::constants::controls::{DEFAULT_OBSTACLES, GRID_PRESETS};
use crate::error::{SimulationError, SimulationResult};
use crate::input::{screen_to_field, PointerState};
use crate::obstacles::{Brush, ObstacleField};
use crate::particles::{ParticleSystem, WorldParameters};
use crate::renderer::{Compositor, RenderMode};
use crate::time::{clamp_timestep, FrameClock};

/// The whole app: particles, obstacles, renderer and the controls that
/// drive them.
pub struct Simulation {
    backend: ComputeBackend,
    particles: ParticleSystem,
    obstacles: ObstacleField,
    compositor: Compositor,
    pointer: PointerState,
    clock: FrameClock,
    brush_size: f32,
    brush: Brush,
    /// Field position of the mobile obstacle, if one is placed
    mobile_center: Option<Vec2>,
    viewport: (u32, u32),
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let backend = ComputeBackend::new(config.threads)?;
        Self::with_backend(config, backend)
    }

    /// Build on an existing backend, e.g. one with reduced capabilities
    pub fn with_backend(config: SimulationConfig, backend: ComputeBackend) -> SimulationResult<Self> {
        config.validate()?;

        let (width, height) = config.viewport;
        let (grid_w, grid_h) = config.grid;
        let world = WorldParameters::new(width as f32, height as f32);

        let mut particles = ParticleSystem::new(world, grid_w, grid_h, config.seed)?;
        particles.set_acceleration(Vec2::from(config.acceleration));
        particles.set_speed(config.speed);

        let compositor = Compositor::new(
            width,
            height,
            config.render_mode,
            config.point_size,
            config.fluid,
            config.display_obstacle_normals,
            &backend,
        );

        let mut simulation = Self {
            backend,
            particles,
            obstacles: ObstacleField::new(width, height),
            compositor,
            pointer: PointerState::new(),
            clock: FrameClock::new(),
            brush_size: config.brush_size,
            brush: Brush::from_pixels(config.brush_size, width, height),
            mobile_center: None,
            viewport: config.viewport,
        };

        if config.default_obstacles {
            simulation.stamp_default_obstacles();
        }

        log::info!(
            "[Simulation::new] {} particles ({}x{}), viewport {}x{}, {:?} mode",
            simulation.particles.particle_count(),
            grid_w,
            grid_h,
            width,
            height,
            config.render_mode
        );
        Ok(simulation)
    }

    fn stamp_default_obstacles(&mut self) {
        let (width, height) = self.viewport;
        for (screen, diameter) in DEFAULT_OBSTACLES {
            let center = screen_to_field(Vec2::from(screen));
            let brush = Brush::from_pixels(diameter, width, height);
            self.obstacles.add_static_obstacle(&self.backend, center, brush);
            self.mobile_center = Some(center);
        }
    }

    /// Advance by `dt` seconds and render. `dt` is clamped to `[0, 0.1]`.
    pub fn tick(&mut self, dt: f32) -> &ColorBuffer {
        let dt = clamp_timestep(dt);
        self.particles.update(&self.backend, &self.obstacles, dt);
        self.compositor.render(&self.backend, &self.particles, &self.obstacles)
    }

    /// Tick using a frame timestamp in seconds
    pub fn frame(&mut self, timestamp: f64) -> &ColorBuffer {
        let dt = self.clock.advance(timestamp);
        self.tick(dt)
    }

    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    pub fn output(&self) -> &ColorBuffer {
        self.compositor.output()
    }

    pub fn backend(&self) -> &ComputeBackend {
        &self.backend
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.particles.set_acceleration(acceleration);
        log::debug!("[Simulation::set_acceleration] {:?}", acceleration);
    }

    /// Downward acceleration of magnitude `gravity`
    pub fn set_gravity(&mut self, gravity: f32) {
        self.set_acceleration(Vec2::new(0.0, -gravity));
    }

    /// Time multiplier, clamped to `>= 0`
    pub fn set_speed(&mut self, speed: f32) {
        self.particles.set_speed(speed);
        log::debug!("[Simulation::set_speed] {}", self.particles.speed());
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.compositor.points_mut().set_point_size(size);
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Brush diameter in pixels. The mobile obstacle is redrawn right away.
    pub fn set_brush_size(&mut self, diameter: f32) {
        let (width, height) = self.viewport;
        self.brush_size = diameter.max(0.0);
        self.brush = Brush::from_pixels(self.brush_size, width, height);
        if let Some(center) = self.mobile_center {
            self.obstacles.set_mobile_obstacle(&self.backend, center, self.brush);
        }
        log::debug!("[Simulation::set_brush_size] {}px", self.brush_size);
    }

    pub fn set_display_obstacle_normals(&mut self, display: bool) {
        self.compositor.overlay_mut().display_normals = display;
    }

    pub fn set_kernel_size(&mut self, size: usize) {
        self.compositor.fluid_mut().set_kernel_size(size);
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.compositor.fluid_mut().set_threshold(threshold);
    }

    pub fn set_show_normals(&mut self, show: bool) {
        self.compositor.fluid_mut().set_show_normals(show);
    }

    pub fn set_specular(&mut self, enabled: bool) {
        self.compositor.fluid_mut().set_specular(enabled);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.compositor.set_mode(mode);
    }

    /// New random particles on a `width` x `height` grid. Obstacles stay.
    pub fn resize_grid(&mut self, width: u32, height: u32) -> SimulationResult<()> {
        self.particles.reset(width, height)?;
        log::info!(
            "[Simulation::resize_grid] {}x{} grid, {} particles",
            width,
            height,
            self.particles.particle_count()
        );
        Ok(())
    }

    pub fn select_grid_preset(&mut self, index: usize) -> SimulationResult<()> {
        let (width, height) = *GRID_PRESETS.get(index).ok_or(SimulationError::UnknownPreset {
            index,
            count: GRID_PRESETS.len(),
        })?;
        self.resize_grid(width, height)
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.reset();
        self.mobile_center = None;
    }

    /// Pointer moved to `screen` (normalized, y down). Drags stamp.
    pub fn pointer_moved(&mut self, screen: Vec2) {
        self.pointer.process_motion(screen);
        let center = self.pointer.field_position();
        if self.pointer.is_pressed() {
            self.obstacles.add_static_obstacle(&self.backend, center, self.brush);
        } else {
            self.obstacles.set_mobile_obstacle(&self.backend, center, self.brush);
        }
        self.mobile_center = Some(center);
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer.process_button(true);
        let center = self.pointer.field_position();
        self.obstacles.add_static_obstacle(&self.backend, center, self.brush);
        self.mobile_center = Some(center);
    }

    pub fn pointer_released(&mut self) {
        self.pointer.process_button(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::physics::is_obstacle;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            viewport: (64, 64),
            grid: (4, 4),
            default_obstacles: false,
            threads: Some(2),
            seed: Some(3),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_zero_grid_rejected() {
        let config = SimulationConfig { grid: (0, 4), ..small_config() };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_tick_renders_viewport() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let frame = sim.tick(1.0 / 60.0);
        assert_eq!((frame.width(), frame.height()), (64, 64));
    }

    #[test]
    fn test_default_obstacles_stamped() {
        let config = SimulationConfig { default_obstacles: true, viewport: (200, 200), ..small_config() };
        let sim = Simulation::new(config).unwrap();
        // rim of the large obstacle at screen (0.5, 0.8), diameter 100px
        let rim = screen_to_field(Vec2::new(0.5, 0.8)) + Vec2::new(0.2, 0.0);
        assert!(is_obstacle(sim.obstacles().query(rim)));
        assert!(!is_obstacle(sim.obstacles().query(Vec2::new(0.9, 0.9))));
    }

    #[test]
    fn test_grid_presets() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.select_grid_preset(1).unwrap();
        assert_eq!(sim.particles().particle_count(), 32 * 32);
        assert!(matches!(
            sim.select_grid_preset(GRID_PRESETS.len()),
            Err(SimulationError::UnknownPreset { .. })
        ));
        assert!(matches!(sim.resize_grid(0, 2), Err(SimulationError::InvalidGrid { .. })));
    }

    #[test]
    fn test_resize_keeps_obstacles() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.pointer_moved(Vec2::new(0.5, 0.5));
        sim.pointer_pressed();
        sim.pointer_released();
        let before = sim.obstacles().static_layer().clone();
        sim.resize_grid(8, 8).unwrap();
        assert_eq!(sim.obstacles().static_layer(), &before);
    }

    #[test]
    fn test_drag_stamps_and_hover_does_not() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.set_brush_size(10.0);

        sim.pointer_moved(Vec2::new(0.2, 0.2));
        let hovered = screen_to_field(Vec2::new(0.2, 0.2)) + Vec2::new(0.05, 0.0);
        assert!(is_obstacle(sim.obstacles().query(hovered)));

        sim.pointer_moved(Vec2::new(0.8, 0.8));
        assert!(!is_obstacle(sim.obstacles().query(hovered)));

        sim.pointer_pressed();
        sim.pointer_moved(Vec2::new(0.2, 0.2));
        sim.pointer_released();
        sim.pointer_moved(Vec2::new(0.8, 0.8));
        assert!(is_obstacle(sim.obstacles().query(hovered)));
    }

    #[test]
    fn test_clear_obstacles() {
        let mut sim = Simulation::new(SimulationConfig { default_obstacles: true, ..small_config() }).unwrap();
        sim.clear_obstacles();
        let field = sim.obstacles();
        for y in 0..field.height() {
            for x in 0..field.width() {
                assert!(!is_obstacle(field.query(field.mobile_layer().cell_uv(x, y))));
            }
        }
    }

    #[test]
    fn test_negative_speed_clamped() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.set_speed(-2.0);
        assert_eq!(sim.particles().speed(), 0.0);

        let config = SimulationConfig { speed: -1.0, ..small_config() };
        assert!(matches!(Simulation::new(config), Err(SimulationError::Config(_))));
    }

    #[test]
    fn test_gravity_setter() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.set_gravity(9.81);
        assert_eq!(sim.particles().acceleration(), Vec2::new(0.0, -9.81));
    }
}
