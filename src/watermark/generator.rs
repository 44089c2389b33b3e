use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage, imageops::FilterType};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use imageproc::rect::Rect;
use std::path::PathBuf;
use tracing::debug;

use super::error::WatermarkError;
use super::types::{TEXT_TILE_HEIGHT, TEXT_TILE_WIDTH, WatermarkMode, WatermarkSpec};

/// Generate one watermark tile from the spec.
pub fn generate_tile(spec: &WatermarkSpec) -> Result<RgbaImage, WatermarkError> {
    match spec.mode {
        WatermarkMode::Text => text_tile(spec),
        WatermarkMode::Image => image_tile(spec),
    }
}

/// Render the watermark text centered on a fixed 200x100 transparent
/// canvas, rotate about the canvas center, then scale the alpha
/// channel by the clamped opacity. Edges clip against the canvas,
/// like the original painter did.
fn text_tile(spec: &WatermarkSpec) -> Result<RgbaImage, WatermarkError> {
    let font_path = spec
        .font_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("static/DejaVuSans.ttf"));
    if !font_path.exists() {
        return Err(WatermarkError::FontNotFound(font_path));
    }

    let font_data = std::fs::read(&font_path)?;
    let font =
        FontVec::try_from_vec(font_data).map_err(|_| WatermarkError::InvalidFont(font_path))?;

    let mut tile = RgbaImage::from_pixel(TEXT_TILE_WIDTH, TEXT_TILE_HEIGHT, Rgba([0, 0, 0, 0]));

    let scale = PxScale::from(spec.font_size);
    let (text_width, text_height) = text_size(scale, &font, &spec.text);
    let x = (TEXT_TILE_WIDTH as i32 - text_width as i32) / 2;
    let y = (TEXT_TILE_HEIGHT as i32 - text_height as i32) / 2;

    let [r, g, b] = spec.color;
    draw_text_mut(&mut tile, Rgba([r, g, b, 255]), x, y, scale, &font, &spec.text);

    let angle = spec.angle_degrees;
    if angle != 0.0 {
        tile = rotate_about_center(
            &tile,
            angle.to_radians(),
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
        );
    }

    apply_opacity(&mut tile, spec.effective_opacity());
    Ok(tile)
}

/// Load the watermark image and upscale both dimensions by the
/// integer factor (minimum 1). Falls back to a generated placeholder
/// when no image is configured.
fn image_tile(spec: &WatermarkSpec) -> Result<RgbaImage, WatermarkError> {
    let source = match &spec.image_path {
        Some(path) => image::open(path)?.to_rgba8(),
        None => {
            debug!("No watermark image configured, using placeholder tile");
            placeholder_tile()
        }
    };

    let factor = spec.effective_scale();
    if factor == 1 {
        return Ok(source);
    }

    let (width, height) = source.dimensions();
    Ok(image::imageops::resize(
        &source,
        width * factor,
        height * factor,
        FilterType::Nearest,
    ))
}

/// Stand-in for the bundled default watermark image: a translucent
/// gray block with a light outline.
fn placeholder_tile() -> RgbaImage {
    let mut tile = RgbaImage::from_pixel(160, 80, Rgba([128, 128, 128, 90]));
    draw_hollow_rect_mut(
        &mut tile,
        Rect::at(0, 0).of_size(160, 80),
        Rgba([230, 230, 230, 140]),
    );
    tile
}

fn apply_opacity(tile: &mut RgbaImage, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    for pixel in tile.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * opacity).round() as u8;
    }
}
