use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Font file not found: {0}")]
    FontNotFound(PathBuf),

    #[error("Failed to parse font file: {0}")]
    InvalidFont(PathBuf),
}
