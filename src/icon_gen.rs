use crate::{
    background,
    config::{ComposerConfig, RetrowaveConfig},
    logo,
    raster::{composite_over, flatten, gaussian_blur, mask_by_own_alpha},
};
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

#[derive(Debug)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub config: RetrowaveConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Standard,
    /// Smaller logo, leaving room for OS shape masks
    Maskable,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::Maskable];

    pub fn file_name(self, size: u32) -> String {
        match self {
            Variant::Standard => format!("icon-{size}.png"),
            Variant::Maskable => format!("icon-{size}-maskable.png"),
        }
    }

    fn logo_scale(self, cfg: &ComposerConfig) -> f64 {
        match self {
            Variant::Standard => cfg.scale,
            Variant::Maskable => cfg.maskable_scale,
        }
    }
}

/// Where the logo lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Side length of the resized logo
    pub logo_px: u32,
    pub x: i64,
    pub y: i64,
}

/// Center the logo horizontally, with its middle on the `center_y` row.
pub fn logo_placement(size: u32, variant: Variant, cfg: &ComposerConfig) -> Placement {
    let logo_px = ((size as f64 * variant.logo_scale(cfg)) as u32).clamp(1, size.max(1));
    let x = ((size - logo_px) / 2) as i64;
    let y = (size as f64 * cfg.center_y) as i64 - (logo_px / 2) as i64;
    Placement { logo_px, x, y }
}

/// Blurred copy of the logo with its alpha multiplied by the boost factor.
pub fn logo_glow(logo: &RgbaImage, size: u32, cfg: &ComposerConfig) -> RgbaImage {
    let mut glow = gaussian_blur(logo, cfg.glow_blur.sigma(size));
    for pixel in glow.pixels_mut() {
        pixel[3] = (pixel[3] as f64 * cfg.glow_alpha_boost).clamp(0.0, 255.0) as u8;
    }
    glow
}

/// Lay the glow and then the sharp logo over `background`, and flatten to RGB.
///
/// Both layers are first masked by their own alpha, as when pasted through
/// themselves onto a transparent canvas. `mask` is the brightness-extracted
/// logo at source resolution.
pub fn compose_icon(
    mut background: RgbaImage,
    mask: &RgbaImage,
    variant: Variant,
    cfg: &ComposerConfig,
) -> RgbImage {
    let size = background.width();
    let placement = logo_placement(size, variant, cfg);
    debug!(size, ?variant, ?placement, "compositing logo");

    let logo = logo::resize_mask(mask, placement.logo_px);
    let glow = mask_by_own_alpha(&logo_glow(&logo, size, cfg));
    let logo = mask_by_own_alpha(&logo);

    composite_over(&mut background, &glow, placement.x, placement.y);
    composite_over(&mut background, &logo, placement.x, placement.y);

    flatten(background)
}

/// Render one icon from scratch.
pub fn create_icon(
    mask: &RgbaImage,
    size: u32,
    variant: Variant,
    cfg: &RetrowaveConfig,
) -> RgbImage {
    let background = background::render_background(size, &cfg.background);
    compose_icon(background, mask, variant, &cfg.composer)
}

/// Write every size and variant into the output directory, returning the
/// paths in the order they were produced.
pub fn generate_icons(args: &Args) -> Result<Vec<PathBuf>> {
    if args.sizes.is_empty() {
        bail!("At least one icon size is required");
    }
    if args.sizes.contains(&0) {
        bail!("Icon sizes must be greater than zero");
    }
    args.config.validate().context("Invalid configuration")?;

    let source = logo::load_source(&args.input)?;
    let mask = logo::extract_mask(&source, &args.config.logo);

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    println!("Generating retrowave icons...");
    let mut written = Vec::new();

    for &size in &args.sizes {
        // Both variants share one background
        let background = background::render_background(size, &args.config.background);

        for variant in Variant::ALL {
            let icon = compose_icon(background.clone(), &mask, variant, &args.config.composer);

            let filename = variant.file_name(size);
            let output_path = args.output.join(&filename);
            save_png(&icon, &output_path)?;
            println!("  ✓ Generated {filename}");

            written.push(output_path);
        }
    }

    println!("Done.");
    Ok(written)
}

fn save_png(icon: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file: {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(icon.as_raw(), &mut out_file, icon.width())
        .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode 8-bit RGB data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgb8)?;
    Ok(())
}
