use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::compute::ColorBuffer;

/// Convert a render target to an 8-bit image with a top-left origin
pub fn buffer_to_image(buffer: &ColorBuffer) -> RgbaImage {
    let height = buffer.height();
    RgbaImage::from_fn(buffer.width(), height, |x, y| {
        let c = buffer.get(x, height - 1 - y).clamp(glam::Vec4::ZERO, glam::Vec4::ONE) * 255.0;
        Rgba([
            c.x.round() as u8,
            c.y.round() as u8,
            c.z.round() as u8,
            c.w.round() as u8,
        ])
    })
}

/// Save a rendered frame to a PNG file
pub fn save_screenshot(buffer: &ColorBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    buffer_to_image(buffer).save(path)?;
    log::info!("[save_screenshot] Wrote {}x{} frame to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}
