use glam::Vec4;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::codec::Texel;
use crate::compute::{ColorBuffer, Region, Texture};
use crate::error::{SimulationError, SimulationResult};

/// Optional features a backend may or may not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Kernels may read neighbouring texels of their input (needed for
    /// finite-difference normal estimation)
    pub neighborhood_sampling: bool,
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self {
            neighborhood_sampling: true,
        }
    }
}

/// Data-parallel executor for per-cell passes
pub struct ComputeBackend {
    pool: ThreadPool,
    capabilities: BackendCapabilities,
}

impl ComputeBackend {
    /// Build the worker pool. `threads` of `None` or `Some(0)` uses one
    /// worker per logical CPU.
    pub fn new(threads: Option<usize>) -> SimulationResult<Self> {
        let thread_count = threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get);

        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .thread_name(|idx| format!("particle-kernel-{}", idx))
            .build()
            .map_err(|e| {
                log::error!("[ComputeBackend::new] Failed to build worker pool: {}", e);
                SimulationError::UnsupportedEnvironment {
                    message: e.to_string(),
                }
            })?;

        log::info!("[ComputeBackend::new] {} kernel workers", pool.current_num_threads());

        Ok(Self {
            pool,
            capabilities: BackendCapabilities::default(),
        })
    }

    pub fn with_capabilities(mut self, capabilities: BackendCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `kernel` for every cell of `target`
    pub fn dispatch<F>(&self, target: &mut Texture, kernel: F)
    where
        F: Fn(u32, u32) -> Texel + Sync,
    {
        let width = target.width() as usize;
        let texels = &mut target.texels;
        self.pool.install(|| {
            texels
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, texel) in row.iter_mut().enumerate() {
                        *texel = kernel(x as u32, y as u32);
                    }
                });
        });
    }

    /// Run `kernel` over a sub-rectangle only. The kernel receives the
    /// cell's current value; returning it unchanged leaves the cell as is.
    pub fn dispatch_region<F>(&self, target: &mut Texture, region: Region, kernel: F)
    where
        F: Fn(u32, u32, Texel) -> Texel + Sync,
    {
        let width = target.width() as usize;
        let texels = &mut target.texels;
        self.pool.install(|| {
            texels
                .par_chunks_mut(width)
                .enumerate()
                .filter(|(y, _)| (*y as u32) >= region.y0 && (*y as u32) < region.y1)
                .for_each(|(y, row)| {
                    for x in region.x0..region.x1 {
                        let texel = &mut row[x as usize];
                        *texel = kernel(x, y as u32, *texel);
                    }
                });
        });
    }

    /// Full-screen pass into a color target
    pub fn dispatch_color<F>(&self, target: &mut ColorBuffer, kernel: F)
    where
        F: Fn(u32, u32) -> Vec4 + Sync,
    {
        let width = target.width() as usize;
        let pixels = &mut target.pixels;
        self.pool.install(|| {
            pixels
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        *pixel = kernel(x as u32, y as u32);
                    }
                });
        });
    }

    /// Full-screen pass that may keep the previous pixel (a discard)
    pub fn dispatch_color_overlay<F>(&self, target: &mut ColorBuffer, kernel: F)
    where
        F: Fn(u32, u32) -> Option<Vec4> + Sync,
    {
        let width = target.width() as usize;
        let pixels = &mut target.pixels;
        self.pool.install(|| {
            pixels
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        if let Some(color) = kernel(x as u32, y as u32) {
                            *pixel = color;
                        }
                    }
                });
        });
    }
}
