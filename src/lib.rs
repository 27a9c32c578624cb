//! Retrowave-style PWA icon generator.
//!
//! A synthetic sunset-grid background is rendered per size, a neon logo is
//! lifted off its dark backdrop by brightness, and the two are composited into
//! standard and maskable PNG icons.

pub mod background;
pub mod config;
pub mod icon_gen;
pub mod logo;
pub mod raster;

pub use config::RetrowaveConfig;
pub use icon_gen::{generate_icons, Args, Variant};
