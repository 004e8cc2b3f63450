use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::compute::{ColorBuffer, ComputeBackend};
use crate::obstacles::ObstacleField;
use crate::particles::ParticleSystem;
use crate::renderer::{FluidSettings, Fluidifier, ObstacleOverlay, PointRenderer};

/// How particles reach the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Raw point sprites
    Points,
    /// Blurred, thresholded and shaded liquid surface
    #[default]
    Fluid,
}

/// Produces one frame: particles (raw or fluidified), then obstacles on top
pub struct Compositor {
    mode: RenderMode,
    points: PointRenderer,
    fluid: Fluidifier,
    overlay: ObstacleOverlay,
    output: ColorBuffer,
}

impl Compositor {
    pub fn new(
        width: u32,
        height: u32,
        mode: RenderMode,
        point_size: f32,
        fluid_settings: FluidSettings,
        display_obstacle_normals: bool,
        backend: &ComputeBackend,
    ) -> Self {
        Self {
            mode,
            points: PointRenderer::new(point_size),
            fluid: Fluidifier::new(width, height, fluid_settings, backend.capabilities()),
            overlay: ObstacleOverlay::new(display_obstacle_normals),
            output: ColorBuffer::new(width, height),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode != self.mode {
            log::info!("[Compositor::set_mode] {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn points_mut(&mut self) -> &mut PointRenderer {
        &mut self.points
    }

    pub fn fluid(&self) -> &Fluidifier {
        &self.fluid
    }

    pub fn fluid_mut(&mut self) -> &mut Fluidifier {
        &mut self.fluid
    }

    pub fn overlay_mut(&mut self) -> &mut ObstacleOverlay {
        &mut self.overlay
    }

    pub fn output(&self) -> &ColorBuffer {
        &self.output
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.fluid.resize(width, height);
        self.output = ColorBuffer::new(width, height);
        log::debug!("[Compositor::resize] {}x{}", width, height);
    }

    /// Render the current particle state and obstacle field
    pub fn render(&mut self, backend: &ComputeBackend, particles: &ParticleSystem, obstacles: &ObstacleField) -> &ColorBuffer {
        match self.mode {
            RenderMode::Points => {
                self.output.clear(Vec4::ZERO);
                self.points.draw(&mut self.output, particles.state(), particles.world());
            }
            RenderMode::Fluid => {
                let raw = self.fluid.begin_frame();
                self.points.draw(raw, particles.state(), particles.world());
                self.fluid.process(backend);
                self.fluid.draw(backend, &mut self.output);
            }
        }

        self.overlay.draw(backend, &mut self.output, obstacles);
        &self.output
    }
}
