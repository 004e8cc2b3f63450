use glam::Vec2;

use crate::codec::{decode_normal, encode_normal, Texel};
use crate::compute::{ComputeBackend, Region, Texture};
use crate::constants::codec::EMPTY_OBSTACLE_TEXEL;
use crate::obstacles::{Brush, BrushHit};
use crate::particles::ObstacleSampler;

/// Two-layer obstacle normal field
pub struct ObstacleField {
    static_layer: Texture,
    mobile_layer: Texture,
}

impl ObstacleField {
    /// Empty field of `width` x `height` cells
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            static_layer: Texture::filled(width, height, Texel(EMPTY_OBSTACLE_TEXEL)),
            mobile_layer: Texture::filled(width, height, Texel(EMPTY_OBSTACLE_TEXEL)),
        }
    }

    pub fn width(&self) -> u32 {
        self.static_layer.width()
    }

    pub fn height(&self) -> u32 {
        self.static_layer.height()
    }

    pub fn static_layer(&self) -> &Texture {
        &self.static_layer
    }

    /// Layer read by the integrators and the overlay
    pub fn mobile_layer(&self) -> &Texture {
        &self.mobile_layer
    }

    /// Stamp a permanent disk into the static layer, then move the mobile
    /// brush to the same spot.
    pub fn add_static_obstacle(&mut self, backend: &ComputeBackend, center: Vec2, brush: Brush) {
        let (width, height) = (self.width(), self.height());

        if let Some(region) = Region::covering(center, brush.radius, width, height) {
            // in-place: each cell only reads its own previous value
            backend.dispatch_region(&mut self.static_layer, region, |x, y, previous| {
                let uv = Vec2::new(
                    (x as f32 + 0.5) / width as f32,
                    (y as f32 + 0.5) / height as f32,
                );
                match brush.hit(uv, center) {
                    BrushHit::Surface(normal) => encode_normal(normal),
                    BrushHit::Center | BrushHit::Outside => previous,
                }
            });
            log::debug!(
                "[ObstacleField::add_static_obstacle] stamped {} cells at {:?}",
                region.cell_count(),
                center
            );
        }

        self.set_mobile_obstacle(backend, center, brush);
    }

    /// Rebuild the mobile layer: the brush disk over a copy of the static
    /// layer.
    pub fn set_mobile_obstacle(&mut self, backend: &ComputeBackend, center: Vec2, brush: Brush) {
        let static_layer = &self.static_layer;
        backend.dispatch(&mut self.mobile_layer, |x, y| {
            match brush.hit(static_layer.cell_uv(x, y), center) {
                BrushHit::Surface(normal) => encode_normal(normal),
                BrushHit::Center | BrushHit::Outside => static_layer.get(x, y),
            }
        });
    }

    /// Remove every obstacle
    pub fn reset(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.static_layer = Texture::filled(width, height, Texel(EMPTY_OBSTACLE_TEXEL));
        self.mobile_layer = self.static_layer.clone();
        log::info!("[ObstacleField::reset] cleared {}x{} field", width, height);
    }

    /// Bilinearly sampled normal at normalized coordinates
    pub fn query(&self, uv: Vec2) -> Vec2 {
        decode_normal(self.mobile_layer.sample(uv))
    }
}

impl ObstacleSampler for ObstacleField {
    fn normal_at(&self, uv: Vec2) -> Vec2 {
        self.query(uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::physics::is_obstacle;

    fn backend() -> ComputeBackend {
        ComputeBackend::new(Some(2)).unwrap()
    }

    #[test]
    fn test_center_singularity_and_rim_normal() {
        let backend = backend();
        let mut field = ObstacleField::new(5, 5);
        field.add_static_obstacle(&backend, Vec2::splat(0.5), Brush::new(Vec2::splat(0.25)));

        assert!(field.query(Vec2::splat(0.5)).length() < 0.05);

        let rim = field.query(field.static_layer().cell_uv(3, 2));
        assert!((rim.length() - 1.0).abs() < 0.01);
        assert!(rim.x > 0.99);

        let left = field.query(field.static_layer().cell_uv(1, 2));
        assert!(left.x < -0.99);
    }

    #[test]
    fn test_static_stamps_accumulate() {
        let backend = backend();
        let mut field = ObstacleField::new(20, 20);
        let brush = Brush::new(Vec2::splat(0.1));
        field.add_static_obstacle(&backend, Vec2::new(0.25, 0.25), brush);
        field.add_static_obstacle(&backend, Vec2::new(0.75, 0.75), brush);

        let first = decode_normal(field.static_layer().sample(Vec2::new(0.3, 0.25)));
        let second = decode_normal(field.static_layer().sample(Vec2::new(0.8, 0.75)));
        assert!(is_obstacle(first));
        assert!(is_obstacle(second));
    }

    #[test]
    fn test_mobile_layer_replaced_each_call() {
        let backend = backend();
        let mut field = ObstacleField::new(20, 20);
        let brush = Brush::new(Vec2::splat(0.1));

        field.set_mobile_obstacle(&backend, Vec2::new(0.25, 0.25), brush);
        assert!(is_obstacle(field.query(Vec2::new(0.3, 0.25))));

        field.set_mobile_obstacle(&backend, Vec2::new(0.75, 0.75), brush);
        assert!(!is_obstacle(field.query(Vec2::new(0.3, 0.25))));
        assert!(is_obstacle(field.query(Vec2::new(0.8, 0.75))));
        assert!(!is_obstacle(decode_normal(field.static_layer().sample(Vec2::new(0.8, 0.75)))));
    }

    #[test]
    fn test_mobile_outside_brush_matches_static() {
        let backend = backend();
        let mut field = ObstacleField::new(16, 16);
        field.add_static_obstacle(&backend, Vec2::new(0.3, 0.3), Brush::new(Vec2::splat(0.15)));
        field.set_mobile_obstacle(&backend, Vec2::new(0.9, 0.9), Brush::new(Vec2::splat(0.05)));

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(field.mobile_layer().get(x, y), field.static_layer().get(x, y));
            }
        }
    }

    #[test]
    fn test_reset_clears_both_layers() {
        let backend = backend();
        let mut field = ObstacleField::new(8, 8);
        field.add_static_obstacle(&backend, Vec2::splat(0.5), Brush::new(Vec2::splat(0.3)));
        field.reset();

        assert_eq!(field.static_layer(), field.mobile_layer());
        for x in 0..8 {
            assert!(!is_obstacle(field.query(field.static_layer().cell_uv(x, 3))));
        }
    }
}
