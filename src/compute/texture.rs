use glam::{Vec2, Vec4};

use crate::codec::Texel;

/// Rectangle of cells, end-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    /// Cells whose centers can fall inside an axis-aligned box given in
    /// normalized coordinates. Returns `None` when the box misses the grid.
    pub fn covering(center: Vec2, half_extent: Vec2, width: u32, height: u32) -> Option<Self> {
        let to_cells = |lo: f32, hi: f32, size: u32| -> Option<(u32, u32)> {
            let first = (lo * size as f32 - 0.5).floor().max(0.0);
            let last = (hi * size as f32 - 0.5).ceil().min(size as f32 - 1.0);
            if !(first <= last) {
                return None;
            }
            Some((first as u32, last as u32 + 1))
        };

        let (x0, x1) = to_cells(center.x - half_extent.x, center.x + half_extent.x, width)?;
        let (y0, y1) = to_cells(center.y - half_extent.y, center.y + half_extent.y, height)?;
        Some(Self { x0, y0, x1, y1 })
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn cell_count(&self) -> usize {
        ((self.x1 - self.x0) * (self.y1 - self.y0)) as usize
    }
}

/// Fixed-size RGBA8 grid, row-major with row 0 at the bottom (y up)
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pub(crate) texels: Vec<Texel>,
}

impl Texture {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Texel::ZERO)
    }

    pub fn filled(width: u32, height: u32, texel: Texel) -> Self {
        Self {
            width,
            height,
            texels: vec![texel; (width * height) as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Texel) -> Self {
        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self { width, height, texels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Raw RGBA8 bytes, ready for an upload path
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Texel {
        self.texels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, texel: Texel) {
        let idx = self.index(x, y);
        self.texels[idx] = texel;
    }

    /// Clamp-to-edge fetch with signed coordinates
    pub fn fetch_clamped(&self, x: i64, y: i64) -> Texel {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(x, y)
    }

    /// Normalized coordinates of a cell center
    pub fn cell_uv(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }

    /// Bilinear sample at normalized coordinates, clamped to the edges.
    /// Channels are returned in [0,1].
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let px = uv.x * self.width as f32 - 0.5;
        let py = uv.y * self.height as f32 - 0.5;
        if !px.is_finite() || !py.is_finite() {
            return self.fetch_clamped(0, 0).to_vec4();
        }

        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00 = self.fetch_clamped(x0, y0).to_vec4();
        let c10 = self.fetch_clamped(x0 + 1, y0).to_vec4();
        let c01 = self.fetch_clamped(x0, y0 + 1).to_vec4();
        let c11 = self.fetch_clamped(x0 + 1, y0 + 1).to_vec4();

        let bottom = c00.lerp(c10, fx);
        let top = c01.lerp(c11, fx);
        bottom.lerp(top, fy)
    }
}
