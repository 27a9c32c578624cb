use crate::{config::LogoConfig, raster::resize_premultiplied};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;
use tracing::{debug, warn};

/// Decode the source logo. Any readable format works; non-square inputs are
/// stretched when resized.
pub fn load_source(path: &Path) -> Result<RgbaImage> {
    let source = image::open(path)
        .with_context(|| format!("Failed to load logo image: {}", path.display()))?
        .to_rgba8();

    if source.width() != source.height() {
        warn!(
            width = source.width(),
            height = source.height(),
            "logo image is not square and will be stretched"
        );
    }

    Ok(source)
}

/// Opacity for a pixel brightness: a clamped linear ramp between `low` and
/// `high`, raised to `gamma`, truncated to 8 bits.
pub fn brightness_alpha(brightness: u8, cfg: &LogoConfig) -> u8 {
    let ramp = ((brightness as f64 - cfg.low) / (cfg.high - cfg.low)).clamp(0.0, 1.0);
    (ramp.powf(cfg.gamma) * 255.0) as u8
}

fn alpha_table(cfg: &LogoConfig) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (brightness, alpha) in table.iter_mut().enumerate() {
        *alpha = brightness_alpha(brightness as u8, cfg);
    }
    table
}

/// Replace the alpha channel with one derived from brightness (max of R, G, B),
/// keeping color channels as they are.
pub fn extract_mask(source: &RgbaImage, cfg: &LogoConfig) -> RgbaImage {
    let table = alpha_table(cfg);
    let mut mask = source.clone();
    for pixel in mask.pixels_mut() {
        let brightness = pixel[0].max(pixel[1]).max(pixel[2]);
        pixel[3] = table[brightness as usize];
    }
    mask
}

/// Resize an extracted mask to exactly `target_size` x `target_size`.
///
/// Resampling is premultiplied so the dark backdrop hidden under zero alpha
/// does not bleed into the logo's edges.
pub fn resize_mask(mask: &RgbaImage, target_size: u32) -> RgbaImage {
    debug!(target_size, "resizing logo mask");
    resize_premultiplied(mask, target_size, target_size)
}

pub fn extract_logo(source: &RgbaImage, target_size: u32, cfg: &LogoConfig) -> RgbaImage {
    resize_mask(&extract_mask(source, cfg), target_size)
}
