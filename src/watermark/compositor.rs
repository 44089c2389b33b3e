use image::{RgbaImage, imageops};
use tracing::warn;

use super::error::WatermarkError;
use super::generator::generate_tile;
use super::types::WatermarkSpec;

/// Tile the watermark across the base image, alpha-blending one copy
/// at every grid point stepped by the tile's dimensions. Partial
/// tiles clip at the canvas edge. The base is not mutated; a new
/// canvas of identical dimensions is returned.
pub fn tile_watermark(base: &RgbaImage, tile: &RgbaImage) -> RgbaImage {
    let mut result = base.clone();

    if tile.width() == 0 || tile.height() == 0 {
        warn!("Watermark tile has a zero dimension, nothing to composite");
        return result;
    }

    // Step is floored at 1px so a degenerate tile cannot stall the loop.
    let step_x = tile.width().max(1) as i64;
    let step_y = tile.height().max(1) as i64;

    let mut y = 0i64;
    while y < result.height() as i64 {
        let mut x = 0i64;
        while x < result.width() as i64 {
            imageops::overlay(&mut result, tile, x, y);
            x += step_x;
        }
        y += step_y;
    }

    result
}

/// Generate the tile for the spec and composite it over the base.
pub fn apply_watermark(
    base: &RgbaImage,
    spec: &WatermarkSpec,
) -> Result<RgbaImage, WatermarkError> {
    let tile = generate_tile(spec)?;
    Ok(tile_watermark(base, &tile))
}
