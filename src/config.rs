//! Tuning constants for the retrowave renderer
//!
//! Every color stop, threshold, exponent and blur radius used while drawing an
//! icon lives here. The defaults reproduce the stock look; a JSON file can
//! override any subset of fields.

use anyhow::{anyhow, bail, Context, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// An opaque sRGB color.
///
/// Serialized as a CSS hex string; any CSS color syntax is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color([red, green, blue])
    }

    /// Linear interpolation towards `other`, truncating each channel.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let from = self.0[i] as f64;
            let to = other.0[i] as f64;
            *channel = (from + (to - from) * t) as u8;
        }
        Color(out)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.0[0], self.0[1], self.0[2], alpha])
    }

    pub fn opaque(self) -> Rgba<u8> {
        self.with_alpha(255)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(s).map_err(|_| anyhow!("Invalid CSS color: {s}"))?;
        Ok(Color([
            (color.red * 255.).round() as u8,
            (color.green * 255.).round() as u8,
            (color.blue * 255.).round() as u8,
        ]))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

const PINK: Color = Color::new(255, 45, 149);
const VIOLET: Color = Color::new(180, 50, 200);

/// Gaussian blur radius that scales with the icon: `max(min, size / divisor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlurRadius {
    pub divisor: u32,
    pub min: u32,
}

impl BlurRadius {
    pub fn sigma(&self, size: u32) -> f32 {
        (size / self.divisor).max(self.min) as f32
    }
}

/// Root of the configuration tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrowaveConfig {
    pub background: BackgroundConfig,
    pub logo: LogoConfig,
    pub composer: ComposerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Horizon row as a fraction of the icon height
    pub horizon: f64,
    /// Sky gradient stops, top (0.0) to horizon (1.0)
    pub sky: Vec<GradientStop>,
    pub floor: FloorConfig,
    pub grid: GridConfig,
    pub horizon_glow: HorizonGlowConfig,
    pub radial_glow: RadialGlowConfig,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            horizon: 0.58,
            sky: vec![
                GradientStop::new(0.0, Color::new(13, 10, 26)),
                GradientStop::new(0.35, Color::new(18, 12, 34)),
                GradientStop::new(0.55, Color::new(28, 14, 55)),
                GradientStop::new(0.75, Color::new(40, 15, 72)),
                GradientStop::new(1.0, Color::new(52, 16, 88)),
            ],
            floor: FloorConfig::default(),
            grid: GridConfig::default(),
            horizon_glow: HorizonGlowConfig::default(),
            radial_glow: RadialGlowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(position: f64, color: Color) -> Self {
        GradientStop { position, color }
    }
}

/// Vertical floor gradient below the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloorConfig {
    pub top: Color,
    pub bottom: Color,
    /// Blend fraction reached at the last row; below 1.0 the bottom color is never hit
    pub max_blend: f64,
}

impl Default for FloorConfig {
    fn default() -> Self {
        FloorConfig {
            top: Color::new(40, 12, 65),
            bottom: Color::new(13, 10, 26),
            max_blend: 0.6,
        }
    }
}

/// Perspective grid drawn on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub color: Color,
    pub horizontal_lines: u32,
    /// Spacing exponent; values above 1 bunch lines near the horizon
    pub horizontal_exponent: f64,
    pub horizontal_alpha_base: f64,
    pub horizontal_alpha_gain: f64,
    pub vertical_lines: u32,
    /// Width of the bottom edge fan, as a multiple of the icon size
    pub vertical_spread: f64,
    pub vertical_alpha_base: f64,
    pub vertical_alpha_gain: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            color: PINK,
            horizontal_lines: 20,
            horizontal_exponent: 1.6,
            horizontal_alpha_base: 25.0,
            horizontal_alpha_gain: 55.0,
            vertical_lines: 17,
            vertical_spread: 2.2,
            vertical_alpha_base: 25.0,
            vertical_alpha_gain: 30.0,
        }
    }
}

/// Blurred band of lines straddling the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonGlowConfig {
    pub color: Color,
    /// Lines are drawn at offsets `-half_width..=half_width` from the horizon
    pub half_width: i32,
    pub peak_alpha: i32,
    pub falloff: i32,
    /// Horizontal inset on both sides, as a fraction of the icon size
    pub margin: f64,
    pub blur: BlurRadius,
}

impl Default for HorizonGlowConfig {
    fn default() -> Self {
        HorizonGlowConfig {
            color: PINK,
            half_width: 4,
            peak_alpha: 140,
            falloff: 35,
            margin: 0.05,
            blur: BlurRadius {
                divisor: 120,
                min: 2,
            },
        }
    }
}

/// Soft radial glow behind the logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RadialGlowConfig {
    pub center_y: f64,
    pub radius: f64,
    pub ring_step: u32,
    pub peak_alpha: f64,
    pub inner_color: Color,
    pub outer_color: Color,
    pub blur: BlurRadius,
}

impl Default for RadialGlowConfig {
    fn default() -> Self {
        RadialGlowConfig {
            center_y: 0.40,
            radius: 0.35,
            ring_step: 2,
            peak_alpha: 40.0,
            inner_color: PINK,
            outer_color: VIOLET,
            blur: BlurRadius {
                divisor: 80,
                min: 3,
            },
        }
    }
}

/// Brightness-to-alpha ramp used to lift the logo off its dark background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub low: f64,
    pub high: f64,
    pub gamma: f64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        LogoConfig {
            low: 70.0,
            high: 150.0,
            gamma: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    pub scale: f64,
    /// Smaller logo for maskable icons. Approximates the platform safe zone, no stricter.
    pub maskable_scale: f64,
    pub center_y: f64,
    pub glow_blur: BlurRadius,
    pub glow_alpha_boost: f64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            scale: 0.65,
            maskable_scale: 0.55,
            center_y: 0.40,
            glow_blur: BlurRadius {
                divisor: 100,
                min: 2,
            },
            glow_alpha_boost: 1.5,
        }
    }
}

impl RetrowaveConfig {
    /// Load a (possibly partial) configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: RetrowaveConfig =
            serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let bg = &self.background;

        if !(0.0..=1.0).contains(&bg.horizon) {
            bail!("background.horizon must be within [0, 1]");
        }
        if bg.sky.len() < 2 {
            bail!("background.sky needs at least two gradient stops");
        }
        if bg.sky.windows(2).any(|w| w[0].position >= w[1].position) {
            bail!("background.sky stop positions must be strictly increasing");
        }
        if bg.sky[0].position != 0.0 || bg.sky[bg.sky.len() - 1].position != 1.0 {
            bail!("background.sky stops must start at 0.0 and end at 1.0");
        }
        if bg.grid.vertical_lines < 2 {
            bail!("background.grid.vertical_lines must be at least 2");
        }
        if bg.radial_glow.ring_step == 0 {
            bail!("background.radial_glow.ring_step must be positive");
        }
        for (name, blur) in [
            ("background.horizon_glow.blur", &bg.horizon_glow.blur),
            ("background.radial_glow.blur", &bg.radial_glow.blur),
            ("composer.glow_blur", &self.composer.glow_blur),
        ] {
            if blur.divisor == 0 {
                bail!("{name}.divisor must be positive");
            }
        }
        if self.logo.high <= self.logo.low {
            bail!("logo.high must be greater than logo.low");
        }
        if self.composer.scale <= 0.0 || self.composer.maskable_scale <= 0.0 {
            bail!("composer logo scales must be positive");
        }

        Ok(())
    }
}
