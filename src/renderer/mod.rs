mod compositor;
mod fluidify;
mod overlay;
mod points;
mod screenshot;

pub use compositor::{Compositor, RenderMode};
pub use fluidify::{height_normal, BlurKernel, FluidSettings, Fluidifier};
pub use overlay::ObstacleOverlay;
pub use points::{point_style, PointRenderer};
pub use screenshot::{buffer_to_image, save_screenshot};

/// Hermite interpolation between `edge0` and `edge1`
pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::smoothstep;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.79, 1.0, 0.5), 0.0);
        assert_eq!(smoothstep(0.79, 1.0, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }
}
