use image::{Rgba, RgbaImage};
use retrowave_icons::background::render_background;
use retrowave_icons::config::{ComposerConfig, RetrowaveConfig};
use retrowave_icons::icon_gen::{
    compose_icon, create_icon, logo_glow, logo_placement, Placement, Variant,
};
use retrowave_icons::raster::{flatten, mask_by_own_alpha, over};

#[test]
fn test_logo_placement_is_centered() {
    let cfg = ComposerConfig::default();

    assert_eq!(
        logo_placement(512, Variant::Standard, &cfg),
        Placement { logo_px: 332, x: 90, y: 38 }
    );
    assert_eq!(
        logo_placement(512, Variant::Maskable, &cfg),
        Placement { logo_px: 281, x: 115, y: 64 }
    );
    assert_eq!(
        logo_placement(192, Variant::Standard, &cfg),
        Placement { logo_px: 124, x: 34, y: 14 }
    );
}

#[test]
fn test_file_names() {
    assert_eq!(Variant::Standard.file_name(192), "icon-192.png");
    assert_eq!(Variant::Maskable.file_name(512), "icon-512-maskable.png");
}

#[test]
fn test_transparent_logo_leaves_background_untouched() {
    let cfg = RetrowaveConfig::default();
    let background = render_background(96, &cfg.background);
    let mask = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));

    let icon = compose_icon(background.clone(), &mask, Variant::Standard, &cfg.composer);
    assert_eq!(icon, flatten(background));
}

#[test]
fn test_opaque_logo_covers_its_center() {
    let cfg = RetrowaveConfig::default();
    let size = 128;
    let mask = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));

    for variant in Variant::ALL {
        let icon = create_icon(&mask, size, variant, &cfg);
        assert_eq!(icon.dimensions(), (size, size));

        let center = icon.get_pixel(size / 2, (size as f64 * 0.40) as u32);
        assert!(center.0.iter().all(|&c| c >= 250), "{:?}: {:?}", variant, center);

        // Corners stay dark sky or floor
        assert!(icon.get_pixel(0, 0)[0] < 60);
    }
}

#[test]
fn test_glow_alpha_is_boosted_and_clamped() {
    let cfg = ComposerConfig::default();
    let mut logo = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 0]));
    for y in 10..30 {
        for x in 10..30 {
            logo.put_pixel(x, y, Rgba([255, 255, 255, 200]));
        }
    }

    let glow = logo_glow(&logo, 64, &cfg);
    assert_eq!(glow.dimensions(), (40, 40));
    assert_eq!(glow.get_pixel(20, 20)[3], 255);
    assert!(glow.get_pixel(8, 20)[3] > 0, "glow should bleed past the logo edge");
}

#[test]
fn test_logo_layers_are_masked_by_their_own_alpha() {
    let cfg = ComposerConfig::default();
    let size = 64;
    let sky = Rgba([13, 10, 26, 255]);
    let background = RgbaImage::from_pixel(size, size, sky);
    let mask = RgbaImage::from_pixel(64, 64, Rgba([255, 45, 149, 155]));

    let placement = logo_placement(size, Variant::Standard, &cfg);
    let icon = compose_icon(background, &mask, Variant::Standard, &cfg);

    // Expected center: boosted glow (alpha 232) then the logo, each self-masked
    let glow = mask_by_own_alpha(&RgbaImage::from_pixel(1, 1, Rgba([255, 45, 149, 232])));
    let logo = mask_by_own_alpha(&RgbaImage::from_pixel(1, 1, Rgba([255, 45, 149, 155])));
    let expected = over(over(sky, *glow.get_pixel(0, 0)), *logo.get_pixel(0, 0));

    let cx = (placement.x + placement.logo_px as i64 / 2) as u32;
    let cy = (placement.y + placement.logo_px as i64 / 2) as u32;
    let center = icon.get_pixel(cx, cy);
    for i in 0..3 {
        let diff = (center[i] as i32 - expected[i] as i32).abs();
        assert!(diff <= 4, "channel {}: got {:?}, expected {:?}", i, center, expected);
    }

    // Blending the layers unmasked would push red well above 230
    assert!(center[0] < 200, "logo is too bright: {:?}", center);
}
