// Fluid Particles Constants
//
// Tuning values shared by the simulation passes, the renderer and the
// control layer. Kernels never hardcode these numbers themselves.

/// Fixed-point encoding constants
pub mod codec {
    /// Largest 16-bit quantization level (two 8-bit channels)
    pub const QUANT_LEVELS: f32 = 65535.0;

    /// Texel written into an obstacle layer where nothing was painted.
    /// Decodes to a vector of magnitude ~0.0055.
    pub const EMPTY_OBSTACLE_TEXEL: [u8; 4] = [127, 127, 0, 0];
}

/// World parameter derivation
pub mod world {
    /// Maximum particle speed as a fraction of the smaller world extent
    pub const MAX_SPEED_FACTOR: f32 = 0.5;

    /// Position bandwidth as a multiple of the larger world extent
    pub const POSITION_BANDWIDTH_FACTOR: f32 = 1.2;
}

/// Per-cell integrator constants
pub mod physics {
    /// Squared normal magnitude above which a cell counts as an obstacle
    pub const OBSTACLE_THRESHOLD_SQ: f32 = 0.1;

    /// Speed cap after a bounce, as a fraction of max speed
    pub const BOUNCE_SPEED_FACTOR: f32 = 0.1;

    /// Horizontal respawn speed spread, as a fraction of max speed
    pub const RESPAWN_SPREAD_FACTOR: f32 = 0.1;

    /// Largest timestep a single tick may integrate, in seconds
    pub const MAX_TIMESTEP: f32 = 0.1;

    /// Default global acceleration (world units / s²)
    pub const DEFAULT_ACCELERATION: [f32; 2] = [0.0, -100.0];
}

/// Rendering constants
pub mod render {
    pub const SLOW_COLOR: [f32; 4] = [0.75, 1.0, 1.0, 1.0];
    pub const FAST_COLOR: [f32; 4] = [0.0, 0.2, 0.8, 1.0];

    /// Depth range used by particles, scaled by relative speed
    pub const SPEED_DEPTH_SCALE: f32 = 0.9;

    pub const OBSTACLE_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

    pub const DEFAULT_POINT_SIZE: f32 = 2.0;
}

/// Fluid post-process constants
pub mod fluid {
    pub const DEFAULT_KERNEL_SIZE: usize = 9;
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    pub const LIGHT_DIRECTION: [f32; 3] = [0.578, 0.578, -0.578];
    pub const SPECULAR_EDGE_LOW: f32 = 0.79;
    pub const SPECULAR_EXPONENT: f32 = 1.0;
    pub const DIFFUSE_WEIGHT: f32 = 0.05;
    pub const SPECULAR_WEIGHT: f32 = 50.0;
}

/// Control layer defaults and presets
pub mod controls {
    /// Default brush diameter in viewport pixels
    pub const DEFAULT_BRUSH_SIZE: f32 = 60.0;

    pub const DEFAULT_GRID: (u32, u32) = (16, 16);

    /// Headless viewport in pixels (world units)
    pub const DEFAULT_VIEWPORT: (u32, u32) = (512, 512);

    /// Particle grid presets selectable from the UI
    pub const GRID_PRESETS: [(u32, u32); 10] = [
        (16, 16),
        (32, 32),
        (64, 64),
        (128, 128),
        (256, 256),
        (512, 512),
        (512, 1024),
        (1024, 1024),
        (1024, 2048),
        (2048, 2048),
    ];

    /// Obstacles stamped at startup: screen position (y down) and brush
    /// diameter in pixels
    pub const DEFAULT_OBSTACLES: [([f32; 2], f32); 3] = [
        ([0.5, 0.8], 100.0),
        ([0.63, 0.6], 50.0),
        ([0.2, 0.5], 30.0),
    ];
}
