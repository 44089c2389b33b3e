use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed canvas for text-mode watermark tiles.
pub const TEXT_TILE_WIDTH: u32 = 200;
pub const TEXT_TILE_HEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkMode {
    Text,
    Image,
}

/// Everything needed to generate one watermark tile.
///
/// This is the application state the GUI kept spread across widgets:
/// one struct, passed by reference into the pure generator and
/// compositor functions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatermarkSpec {
    #[serde(default = "default_mode")]
    pub mode: WatermarkMode,

    /// Text to render in text mode.
    #[serde(default = "default_text")]
    pub text: String,

    /// TrueType font file for text mode. Defaults to the bundled
    /// static/DejaVuSans.ttf location when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Fill color for text mode as [r, g, b].
    #[serde(default)]
    pub color: [u8; 3],

    /// Opacity in [0, 1]; values outside the range are clamped.
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Rotation in degrees, applied about the tile center.
    #[serde(default)]
    pub angle_degrees: f32,

    /// Integer upscale factor for image mode; 0 behaves as 1.
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Watermark source image for image mode. A built-in placeholder
    /// tile is used when unset.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
}

fn default_mode() -> WatermarkMode {
    WatermarkMode::Text
}

fn default_text() -> String {
    "Your Watermark".to_string()
}

fn default_font_size() -> f32 {
    24.0
}

fn default_opacity() -> f32 {
    1.0
}

fn default_scale() -> u32 {
    1
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            text: default_text(),
            font_path: None,
            font_size: default_font_size(),
            color: [0, 0, 0],
            opacity: default_opacity(),
            angle_degrees: 0.0,
            scale: default_scale(),
            image_path: None,
        }
    }
}

impl WatermarkSpec {
    /// Opacity clamped to [0, 1].
    pub fn effective_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    /// Scale factor with the degenerate 0 treated as 1.
    pub fn effective_scale(&self) -> u32 {
        self.scale.max(1)
    }
}
