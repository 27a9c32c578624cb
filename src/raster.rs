//! Pixel-level drawing primitives shared by the background and composer stages.
//!
//! Drawing onto a layer replaces pixels; only [`composite_over`] blends.

use image::{imageops, imageops::FilterType, DynamicImage, Rgba, Rgba32FImage, RgbImage, RgbaImage};

/// A fully transparent layer of the given square size.
pub fn transparent_layer(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]))
}

fn put_clipped(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

pub fn fill_row(img: &mut RgbaImage, y: u32, color: Rgba<u8>) {
    if y >= img.height() {
        return;
    }
    for x in 0..img.width() {
        img.put_pixel(x, y, color);
    }
}

/// One pixel wide Bresenham line, endpoints included. Off-canvas pixels are dropped.
pub fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_clipped(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

/// Filled disc of the given radius, bounding box `[c - r, c + r]` inclusive.
pub fn fill_circle(img: &mut RgbaImage, center: (i64, i64), radius: i64, color: Rgba<u8>) {
    let (cx, cy) = center;
    let r2 = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        let dy = y - cy;
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                put_clipped(img, x, y, color);
            }
        }
    }
}

/// Gaussian blur over all four channels independently.
pub fn gaussian_blur(img: &RgbaImage, sigma: f32) -> RgbaImage {
    imageops::blur(img, sigma)
}

/// Lanczos3 resize carried out on premultiplied color, so fully transparent
/// pixels contribute nothing to the color of their neighbours.
pub fn resize_premultiplied(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        Rgba([
            p[0] as f32 / 255.0 * a,
            p[1] as f32 / 255.0 * a,
            p[2] as f32 / 255.0 * a,
            a,
        ])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let p = resized.get_pixel(x, y);
        let a = p[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let unpremultiply = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            unpremultiply(p[0]),
            unpremultiply(p[1]),
            unpremultiply(p[2]),
            (a * 255.0).round() as u8,
        ])
    })
}

/// Scale every channel, alpha included, by the pixel's own alpha.
///
/// This is what pasting a layer through itself as a mask onto a transparent
/// canvas produces: color `c * a / 255`, alpha `a * a / 255`.
pub fn mask_by_own_alpha(layer: &RgbaImage) -> RgbaImage {
    let mut masked = layer.clone();
    for pixel in masked.pixels_mut() {
        let a = u32::from(pixel[3]);
        for channel in pixel.0.iter_mut() {
            *channel = ((u32::from(*channel) * a + 127) / 255) as u8;
        }
    }
    masked
}

/// Straight-alpha source-over of a single pixel.
///
/// An opaque destination always stays exactly opaque.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u32::from(src[i]) * sa * 255;
        let dc = u32::from(dst[i]) * da * inv;
        out[i] = ((sc + dc + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    Rgba(out)
}

/// Blend `layer` onto `canvas` with its top-left corner at `(x, y)`.
pub fn composite_over(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    for (lx, ly, src) in layer.enumerate_pixels() {
        let cx = x + lx as i64;
        let cy = y + ly as i64;
        if cx < 0 || cy < 0 || cx >= width || cy >= height {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        *dst = over(*dst, *src);
    }
}

/// Drop the alpha channel.
pub fn flatten(canvas: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}
