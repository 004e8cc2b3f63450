use glam::Vec2;

/// Disk brush, radius given per axis in normalized field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub radius: Vec2,
}

/// Where a cell lies relative to a brush stamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushHit {
    Outside,
    /// Exactly on the center, where the normal is undefined
    Center,
    /// Inside or on the rim, with the outward unit normal
    Surface(Vec2),
}

impl Brush {
    pub fn new(radius: Vec2) -> Self {
        Self { radius }
    }

    /// Brush of `diameter` pixels on a `width` x `height` viewport
    pub fn from_pixels(diameter: f32, width: u32, height: u32) -> Self {
        Self {
            radius: 0.5 * Vec2::new(diameter / width as f32, diameter / height as f32),
        }
    }

    pub fn hit(&self, uv: Vec2, center: Vec2) -> BrushHit {
        if self.radius.x <= 0.0 || self.radius.y <= 0.0 {
            return BrushHit::Outside;
        }

        let from_center = (uv - center) / self.radius;
        let dist_sq = from_center.length_squared();
        if dist_sq > 1.0 {
            BrushHit::Outside
        } else if dist_sq == 0.0 {
            BrushHit::Center
        } else {
            BrushHit::Surface(from_center / dist_sq.sqrt())
        }
    }
}
