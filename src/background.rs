use crate::{
    config::{BackgroundConfig, Color, GradientStop},
    raster::{composite_over, draw_line, fill_circle, fill_row, gaussian_blur, transparent_layer},
};
use image::{Rgba, RgbaImage};
use tracing::debug;

/// Row separating sky from floor.
pub fn horizon_row(size: u32, cfg: &BackgroundConfig) -> u32 {
    (size as f64 * cfg.horizon) as u32
}

/// Color at `t` along a stop list, or `None` when `t` falls outside every pair.
pub fn sample_gradient(stops: &[GradientStop], t: f64) -> Option<Color> {
    stops
        .windows(2)
        .find(|pair| pair[0].position <= t && t <= pair[1].position)
        .map(|pair| {
            let local = (t - pair[0].position) / (pair[1].position - pair[0].position);
            pair[0].color.lerp(pair[1].color, local)
        })
}

/// Opaque sky and floor gradients without any overlays.
pub fn base_gradient(size: u32, cfg: &BackgroundConfig) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 255]));
    let horizon = horizon_row(size, cfg);

    for y in 0..horizon {
        let t = y as f64 / horizon.max(1) as f64;
        if let Some(color) = sample_gradient(&cfg.sky, t) {
            fill_row(&mut canvas, y, color.opaque());
        }
    }

    let floor_height = (size - horizon).max(1) as f64;
    for y in horizon..size {
        let t = (y - horizon) as f64 / floor_height;
        let color = cfg.floor.top.lerp(cfg.floor.bottom, t * cfg.floor.max_blend);
        fill_row(&mut canvas, y, color.opaque());
    }

    canvas
}

/// Perspective grid: horizontal lines bunched toward the horizon, plus a fan
/// of lines converging on the vanishing point at the horizon's center.
pub fn grid_layer(size: u32, cfg: &BackgroundConfig) -> RgbaImage {
    let grid = &cfg.grid;
    let mut layer = transparent_layer(size);
    let horizon = horizon_row(size, cfg) as i64;
    let floor_height = size as f64 - horizon as f64;
    let vanish_x = (size / 2) as i64;
    let size_i = size as i64;

    for i in 0..grid.horizontal_lines {
        let t = i as f64 / grid.horizontal_lines as f64;
        let y = horizon + (floor_height * t.powf(grid.horizontal_exponent)) as i64;
        let alpha = (grid.horizontal_alpha_base + grid.horizontal_alpha_gain * t) as u8;
        draw_line(&mut layer, (0, y), (size_i, y), grid.color.with_alpha(alpha));
    }

    for i in 0..grid.vertical_lines {
        let frac = i as f64 / (grid.vertical_lines - 1) as f64;
        let x_bottom = (vanish_x as f64 + (frac - 0.5) * size as f64 * grid.vertical_spread) as i64;
        let weight = 1.0 - (frac - 0.5).abs() * 2.0;
        let alpha = (grid.vertical_alpha_base + grid.vertical_alpha_gain * weight) as u8;
        draw_line(
            &mut layer,
            (vanish_x, horizon),
            (x_bottom, size_i),
            grid.color.with_alpha(alpha),
        );
    }

    layer
}

/// Blurred band of lines around the horizon, fading with distance from it.
pub fn horizon_glow_layer(size: u32, cfg: &BackgroundConfig) -> RgbaImage {
    let glow = &cfg.horizon_glow;
    let mut layer = transparent_layer(size);
    let horizon = horizon_row(size, cfg) as i64;
    let margin = (size as f64 * glow.margin) as i64;

    for offset in -glow.half_width..=glow.half_width {
        let alpha = (glow.peak_alpha - offset.abs() * glow.falloff).clamp(0, 255) as u8;
        let y = horizon + offset as i64;
        draw_line(
            &mut layer,
            (margin, y),
            (size as i64 - margin, y),
            glow.color.with_alpha(alpha),
        );
    }

    let sigma = glow.blur.sigma(size);
    debug!(size, sigma, "blurring horizon glow");
    gaussian_blur(&layer, sigma)
}

/// Concentric rings drawn outside-in so that inner, brighter rings win.
pub fn radial_glow_layer(size: u32, cfg: &BackgroundConfig) -> RgbaImage {
    let glow = &cfg.radial_glow;
    let mut layer = transparent_layer(size);
    let center = ((size / 2) as i64, (size as f64 * glow.center_y) as i64);
    let radius = (size as f64 * glow.radius) as i64;

    for r in (1..=radius).rev().step_by(glow.ring_step as usize) {
        let t = r as f64 / radius as f64;
        let alpha = (glow.peak_alpha * (1.0 - t).powi(2)) as u8;
        let color = glow.inner_color.lerp(glow.outer_color, t);
        fill_circle(&mut layer, center, r, color.with_alpha(alpha));
    }

    let sigma = glow.blur.sigma(size);
    debug!(size, radius, sigma, "blurring radial glow");
    gaussian_blur(&layer, sigma)
}

/// Full retrowave backdrop for a `size` x `size` icon. Always fully opaque.
pub fn render_background(size: u32, cfg: &BackgroundConfig) -> RgbaImage {
    debug!(size, horizon = horizon_row(size, cfg), "rendering background");

    let mut canvas = base_gradient(size, cfg);
    composite_over(&mut canvas, &grid_layer(size, cfg), 0, 0);
    composite_over(&mut canvas, &horizon_glow_layer(size, cfg), 0, 0);
    composite_over(&mut canvas, &radial_glow_layer(size, cfg), 0, 0);
    canvas
}
