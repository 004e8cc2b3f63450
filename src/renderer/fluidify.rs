use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::compute::{BackendCapabilities, ColorBuffer, ComputeBackend};
use crate::constants::fluid::{
    DEFAULT_KERNEL_SIZE, DEFAULT_THRESHOLD, DIFFUSE_WEIGHT, LIGHT_DIRECTION, SPECULAR_EDGE_LOW,
    SPECULAR_EXPONENT, SPECULAR_WEIGHT,
};
use crate::renderer::smoothstep;

/// Runtime settings of the fluid look
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidSettings {
    pub kernel_size: usize,
    pub threshold: f32,
    pub show_normals: bool,
    pub specular: bool,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            threshold: DEFAULT_THRESHOLD,
            show_normals: false,
            specular: true,
        }
    }
}

/// Normalized 1D Gaussian weights
#[derive(Debug, Clone, PartialEq)]
pub struct BlurKernel {
    weights: Vec<f32>,
}

impl BlurKernel {
    /// `size` taps of `exp(-4x²)` with x spread over [-1, 1)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let mut weights: Vec<f32> = (0..size)
            .map(|i| {
                let x = 2.0 * i as f32 / size as f32 - 1.0;
                (-4.0 * x * x).exp()
            })
            .collect();

        let total: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }
        Self { weights }
    }

    pub fn size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

#[derive(Debug, Clone, Copy)]
enum BlurAxis {
    Horizontal,
    Vertical,
}

fn blur_pass(backend: &ComputeBackend, kernel: &BlurKernel, source: &ColorBuffer, target: &mut ColorBuffer, axis: BlurAxis) {
    let weights = kernel.weights();
    let offset = (weights.len() / 2) as i64;

    backend.dispatch_color(target, |x, y| {
        let (x, y) = (x as i64, y as i64);
        weights
            .iter()
            .enumerate()
            .fold(Vec4::ZERO, |acc, (i, &w)| {
                let step = i as i64 - offset;
                let texel = match axis {
                    BlurAxis::Horizontal => source.fetch_clamped(x + step, y),
                    BlurAxis::Vertical => source.fetch_clamped(x, y + step),
                };
                acc + w * texel
            })
    });
}

/// Surface normal of the alpha height field at a pixel
pub fn height_normal(field: &ColorBuffer, x: u32, y: u32) -> Vec3 {
    let (x, y) = (x as i64, y as i64);
    let texel_x = 1.0 / field.width() as f32;
    let texel_y = 1.0 / field.height() as f32;

    let dx = field.fetch_clamped(x + 1, y).w - field.fetch_clamped(x - 1, y).w;
    let dy = field.fetch_clamped(x, y + 1).w - field.fetch_clamped(x, y - 1).w;

    Vec3::new(texel_x, 0.0, dx)
        .cross(Vec3::new(0.0, texel_y, dy))
        .normalize()
}

/// Makes the point cloud look like a liquid: blur, then threshold and shade
pub struct Fluidifier {
    settings: FluidSettings,
    kernel: BlurKernel,
    shading_available: bool,
    raw: ColorBuffer,
    half_blurred: ColorBuffer,
    blurred: ColorBuffer,
}

impl Fluidifier {
    pub fn new(width: u32, height: u32, settings: FluidSettings, capabilities: BackendCapabilities) -> Self {
        let shading_available = capabilities.neighborhood_sampling;
        if !shading_available {
            log::warn!("[Fluidifier::new] Neighborhood sampling unsupported, fluid shading disabled");
        }

        Self {
            kernel: BlurKernel::new(settings.kernel_size),
            settings,
            shading_available,
            raw: ColorBuffer::new(width, height),
            half_blurred: ColorBuffer::new(width, height),
            blurred: ColorBuffer::new(width, height),
        }
    }

    pub fn settings(&self) -> &FluidSettings {
        &self.settings
    }

    pub fn kernel(&self) -> &BlurKernel {
        &self.kernel
    }

    pub fn shading_available(&self) -> bool {
        self.shading_available
    }

    /// Weights are rebuilt only when the size actually changes
    pub fn set_kernel_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.kernel.size() {
            self.kernel = BlurKernel::new(size);
            log::debug!("[Fluidifier::set_kernel_size] {} taps", size);
        }
        self.settings.kernel_size = size;
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.settings.threshold = threshold;
    }

    pub fn set_show_normals(&mut self, show: bool) {
        self.settings.show_normals = show;
    }

    pub fn set_specular(&mut self, enabled: bool) {
        self.settings.specular = enabled;
    }

    /// Cleared buffer the raw point cloud is drawn into
    pub fn begin_frame(&mut self) -> &mut ColorBuffer {
        self.raw.clear(Vec4::ZERO);
        &mut self.raw
    }

    pub fn raw(&self) -> &ColorBuffer {
        &self.raw
    }

    pub fn blurred(&self) -> &ColorBuffer {
        &self.blurred
    }

    /// Horizontal then vertical blur of the raw buffer
    pub fn process(&mut self, backend: &ComputeBackend) {
        blur_pass(backend, &self.kernel, &self.raw, &mut self.half_blurred, BlurAxis::Horizontal);
        blur_pass(backend, &self.kernel, &self.half_blurred, &mut self.blurred, BlurAxis::Vertical);
    }

    /// Threshold and shade the blurred field into `target`
    pub fn draw(&self, backend: &ComputeBackend, target: &mut ColorBuffer) {
        let blurred = &self.blurred;
        let threshold = self.settings.threshold;
        let show_normals = self.shading_available && self.settings.show_normals;
        let show_light = self.shading_available && self.settings.specular;
        let shade = show_normals || show_light;
        let light_dir = Vec3::from(LIGHT_DIRECTION);

        backend.dispatch_color(target, |x, y| {
            let texel = blurred.fetch_clamped(x as i64, y as i64);
            let height = texel.w;
            if height < threshold {
                return Vec4::ZERO;
            }
            if !shade {
                return texel;
            }

            let n = height_normal(blurred, x, y);
            let color = if show_normals {
                (0.5 * n + Vec3::splat(0.5)).extend(1.0)
            } else {
                texel
            };

            if !show_light {
                return color;
            }
            let h = n.dot(light_dir);
            let diffuse = 2.0 * h + 1.0;
            let specular = smoothstep(SPECULAR_EDGE_LOW, 1.0, h).powf(SPECULAR_EXPONENT);
            let light = DIFFUSE_WEIGHT * diffuse + SPECULAR_WEIGHT * specular;
            color + Vec4::new(light, light, light, 0.0)
        });
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.raw = ColorBuffer::new(width, height);
        self.half_blurred = ColorBuffer::new(width, height);
        self.blurred = ColorBuffer::new(width, height);
    }
}
