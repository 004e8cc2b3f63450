//! Error types for the simulation core.
//!
//! Only environment and configuration failures are errors. Values outside a
//! codec's bandwidth saturate, and missing optional backend features degrade
//! the affected component instead of failing.

use std::path::PathBuf;

/// Fatal simulation errors
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Compute backend unavailable: {message}")]
    UnsupportedEnvironment { message: String },

    #[error("Invalid grid size {width}x{height}: both dimensions must be at least 1")]
    InvalidGrid { width: u32, height: u32 },

    #[error("Grid preset {index} does not exist ({count} presets available)")]
    UnknownPreset { index: usize, count: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type SimulationResult<T> = Result<T, SimulationError>;
