use retrowave_icons::background::{
    base_gradient, grid_layer, horizon_glow_layer, horizon_row, radial_glow_layer,
    render_background, sample_gradient,
};
use retrowave_icons::config::{BackgroundConfig, Color};
use image::Rgba;

#[test]
fn test_horizon_row_is_floored() {
    let cfg = BackgroundConfig::default();
    assert_eq!(horizon_row(192, &cfg), 111);
    assert_eq!(horizon_row(512, &cfg), 296);
}

#[test]
fn test_background_is_square_and_opaque() {
    let cfg = BackgroundConfig::default();
    for size in [16, 64, 192] {
        let bg = render_background(size, &cfg);
        assert_eq!(bg.dimensions(), (size, size));
        assert!(
            bg.pixels().all(|p| p[3] == 255),
            "background of size {} has translucent pixels",
            size
        );
    }
}

#[test]
fn test_sky_starts_at_first_stop_and_ends_near_last() {
    let cfg = BackgroundConfig::default();
    let size = 512;
    let horizon = horizon_row(size, &cfg);
    let base = base_gradient(size, &cfg);

    assert_eq!(*base.get_pixel(0, 0), Rgba([13, 10, 26, 255]));
    assert_eq!(*base.get_pixel(size - 1, 0), Rgba([13, 10, 26, 255]));

    // t = 295/296, between (40,15,72) and (52,16,88)
    assert_eq!(*base.get_pixel(10, horizon - 1), Rgba([51, 15, 87, 255]));
}

#[test]
fn test_floor_starts_at_top_color_and_never_reaches_bottom() {
    let cfg = BackgroundConfig::default();
    let size = 192;
    let horizon = horizon_row(size, &cfg);
    let base = base_gradient(size, &cfg);

    assert_eq!(*base.get_pixel(5, horizon), Rgba([40, 12, 65, 255]));

    let last = base.get_pixel(5, size - 1);
    assert!(last[0] > 13 && last[0] < 40, "floor bottom red was {}", last[0]);
}

#[test]
fn test_sample_gradient_brackets_stops() {
    let cfg = BackgroundConfig::default();
    assert_eq!(sample_gradient(&cfg.sky, 0.35), Some(Color::new(18, 12, 34)));
    assert_eq!(sample_gradient(&cfg.sky, 1.0), Some(Color::new(52, 16, 88)));
    assert_eq!(sample_gradient(&cfg.sky, 1.5), None);
}

#[test]
fn test_grid_is_transparent_above_horizon() {
    let cfg = BackgroundConfig::default();
    let size = 192;
    let horizon = horizon_row(size, &cfg);
    let grid = grid_layer(size, &cfg);

    for y in 0..horizon {
        assert!(grid.get_pixel(size / 2, y)[3] == 0 && grid.get_pixel(0, y)[3] == 0);
    }

    // Every vertical line starts at the vanishing point
    let vanish = grid.get_pixel(size / 2, horizon);
    assert!(vanish[3] > 0);
    assert_eq!([vanish[0], vanish[1], vanish[2]], [255, 45, 149]);

    // The faintest horizontal lines collapse onto the horizon row
    let edge = grid.get_pixel(1, horizon)[3];
    assert!((25..=28).contains(&edge), "horizon row alpha was {}", edge);
}

#[test]
fn test_background_is_deterministic() {
    let cfg = BackgroundConfig::default();
    assert_eq!(render_background(128, &cfg), render_background(128, &cfg));
}

#[test]
fn test_horizon_glow_respects_margin_and_peaks_on_horizon() {
    let cfg = BackgroundConfig::default();
    let size = 480;
    let horizon = horizon_row(size, &cfg);
    let glow = horizon_glow_layer(size, &cfg);

    // margin = 24, blur sigma = 4: nothing reaches the first columns
    for x in 0..12 {
        for y in 0..size {
            assert_eq!(glow.get_pixel(x, y)[3], 0, "pixel ({}, {}) is lit", x, y);
        }
    }

    // Far from the horizon the layer stays empty
    assert_eq!(glow.get_pixel(size / 2, 0)[3], 0);
    assert_eq!(glow.get_pixel(size / 2, size - 1)[3], 0);

    let column = size / 2;
    let peak = glow.get_pixel(column, horizon)[3];
    assert!(peak > 0);
    for offset in 1..=10 {
        assert!(glow.get_pixel(column, horizon - offset)[3] <= peak);
        assert!(glow.get_pixel(column, horizon + offset)[3] <= peak);
    }
    assert!(glow.get_pixel(column, horizon + 6)[3] < peak);

    // Pink hue survives the blur, though darkened by the empty rows around it
    let tint = glow.get_pixel(column, horizon);
    assert!(tint[0] > tint[2] && tint[2] > tint[1], "tint {:?}", tint);
}

#[test]
fn test_radial_glow_fades_from_pink_center_to_violet_rim() {
    let cfg = BackgroundConfig::default();
    let size = 192;
    let glow = radial_glow_layer(size, &cfg);

    let (cx, cy) = (size / 2, (size as f64 * 0.40) as u32);
    let radius = (size as f64 * 0.35) as u32;
    let center = glow.get_pixel(cx, cy);
    let rim = glow.get_pixel(cx + radius * 4 / 5, cy);

    assert!(center[3] > rim[3], "center {:?} rim {:?}", center, rim);
    assert!(center[0] > rim[0], "center {:?} rim {:?}", center, rim);
    assert!(rim[2] > center[2], "center {:?} rim {:?}", center, rim);

    // Beyond radius plus blur support the layer is empty
    let reach = radius + 3 * 4;
    assert_eq!(glow.get_pixel(cx, cy + reach)[3], 0);
    assert_eq!(glow.get_pixel(cx - reach, cy)[3], 0);
    assert_eq!(glow.get_pixel(0, 0)[3], 0);
    assert_eq!(glow.get_pixel(size - 1, size - 1)[3], 0);
}
