//! Obstacle normal field
//!
//! Obstacles are painted with a disk brush. The static layer accumulates
//! permanent stamps; the mobile layer is the static layer plus the brush
//! currently under the pointer, and is what the integrators read.

pub mod brush;
pub mod obstacle_field;

pub use brush::{Brush, BrushHit};
pub use obstacle_field::ObstacleField;
