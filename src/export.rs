use image::{DynamicImage, Rgba, RgbaImage, imageops, imageops::FilterType};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::ImageSizeConfig;
use crate::watermark::{WatermarkError, tile_watermark};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No images selected")]
    EmptySelection,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Watermark error: {0}")]
    WatermarkError(#[from] WatermarkError),

    #[error("Source path has no parent directory: {0}")]
    NoParentDirectory(PathBuf),

    #[error("Source path has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Outcome of a batch export. Per-file failures are collected rather
/// than aborting the whole batch.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ExportError)>,
}

/// Scale the image to fit within width x height preserving aspect
/// ratio, centered on a white canvas of exactly the target size.
pub fn aspect_fit(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let resized = img.resize(width, height, FilterType::Lanczos3);
    let x = ((width - resized.width()) / 2) as i64;
    let y = ((height - resized.height()) / 2) as i64;
    imageops::overlay(&mut canvas, &resized, x, y);

    canvas
}

/// Watermark and export every source at every output size.
///
/// Output folders are created as siblings of the first source, one
/// per size, named by `ImageSizeConfig::folder_name`. Output files
/// keep the source's base filename, so same-named sources from
/// different folders overwrite each other.
pub fn export_batch(
    sources: &[PathBuf],
    tile: &RgbaImage,
    sizes: &[ImageSizeConfig],
) -> Result<ExportSummary, ExportError> {
    if sources.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let base_dir = sources[0]
        .parent()
        .ok_or_else(|| ExportError::NoParentDirectory(sources[0].clone()))?;

    for size in sizes {
        std::fs::create_dir_all(base_dir.join(size.folder_name()))?;
    }

    let mut summary = ExportSummary::default();
    for source in sources {
        match export_one(source, tile, sizes, base_dir) {
            Ok(paths) => summary.written.extend(paths),
            Err(e) => {
                error!("Failed to export {:?}: {}", source, e);
                summary.failed.push((source.clone(), e));
            }
        }
    }

    info!(
        "Exported {} files from {} sources ({} failed)",
        summary.written.len(),
        sources.len(),
        summary.failed.len()
    );
    Ok(summary)
}

fn export_one(
    source: &Path,
    tile: &RgbaImage,
    sizes: &[ImageSizeConfig],
    base_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| ExportError::NoFileName(source.to_path_buf()))?;

    debug!("Opening source image: {:?}", source);
    let img = image::open(source)?;

    let mut written = Vec::with_capacity(sizes.len());
    for size in sizes {
        let canvas = aspect_fit(&img, size.width, size.height);
        let stamped = tile_watermark(&canvas, tile);

        // Convert to RGB so JPEG and BMP targets encode cleanly; the
        // letterboxed canvas is fully opaque anyway.
        let rgb = DynamicImage::ImageRgba8(stamped).to_rgb8();

        let destination = base_dir.join(size.folder_name()).join(file_name);
        rgb.save(&destination)?;
        written.push(destination);
    }

    Ok(written)
}
