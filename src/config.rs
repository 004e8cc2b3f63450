use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::controls::{DEFAULT_BRUSH_SIZE, DEFAULT_GRID, DEFAULT_VIEWPORT};
use crate::constants::physics::DEFAULT_ACCELERATION;
use crate::constants::render::DEFAULT_POINT_SIZE;
use crate::error::ConfigError;
use crate::renderer::{FluidSettings, RenderMode};

/// Startup configuration of a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Viewport in pixels; also the world size in world units
    pub viewport: (u32, u32),
    /// Particle grid, one particle per cell
    pub grid: (u32, u32),
    pub acceleration: [f32; 2],
    pub speed: f32,
    pub point_size: f32,
    /// Brush diameter in pixels
    pub brush_size: f32,
    pub render_mode: RenderMode,
    pub fluid: FluidSettings,
    pub display_obstacle_normals: bool,
    /// Stamp the stock obstacle layout at startup
    pub default_obstacles: bool,
    /// Kernel workers, `None` for one per CPU
    pub threads: Option<usize>,
    /// Seed for the initial particle state, `None` for entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT,
            grid: DEFAULT_GRID,
            acceleration: DEFAULT_ACCELERATION,
            speed: 1.0,
            point_size: DEFAULT_POINT_SIZE,
            brush_size: DEFAULT_BRUSH_SIZE,
            render_mode: RenderMode::default(),
            fluid: FluidSettings::default(),
            display_obstacle_normals: false,
            default_obstacles: true,
            threads: None,
            seed: None,
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not a finite number", value),
        })
    }
}

fn check_extent(field: &'static str, (width, height): (u32, u32)) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{}x{} has a zero dimension", width, height),
        });
    }
    Ok(())
}

impl SimulationConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        log::info!("[SimulationConfig::load] Loaded {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extent("viewport", self.viewport)?;
        check_extent("grid", self.grid)?;
        check_finite("acceleration.x", self.acceleration[0])?;
        check_finite("acceleration.y", self.acceleration[1])?;
        check_finite("speed", self.speed)?;
        check_finite("point_size", self.point_size)?;
        check_finite("brush_size", self.brush_size)?;
        check_finite("fluid.threshold", self.fluid.threshold)?;

        if self.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: "must not be negative".to_string(),
            });
        }
        if self.point_size < 0.0 {
            return Err(ConfigError::Invalid {
                field: "point_size",
                reason: "must not be negative".to_string(),
            });
        }
        if self.brush_size < 0.0 {
            return Err(ConfigError::Invalid {
                field: "brush_size",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
