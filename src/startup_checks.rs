use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info};

use crate::watermark::{WatermarkMode, WatermarkSpec};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Font file does not exist: {0}")]
    FontFileMissing(PathBuf),

    #[error("Watermark image does not exist: {0}")]
    WatermarkImageMissing(PathBuf),

    #[error("Source image does not exist: {0}")]
    SourceMissing(PathBuf),
}

impl StartupCheckError {
    /// Checks that make the run pointless rather than merely degraded.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            StartupCheckError::FontFileMissing(_) | StartupCheckError::WatermarkImageMissing(_)
        )
    }
}

pub fn perform_startup_checks(
    spec: &WatermarkSpec,
    sources: &[PathBuf],
) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    match spec.mode {
        WatermarkMode::Text => {
            let font_path = spec
                .font_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("static/DejaVuSans.ttf"));
            if font_path.exists() {
                info!("Font file found: {:?}", font_path);
            } else {
                error!("Font file missing: {:?}", font_path);
                errors.push(StartupCheckError::FontFileMissing(font_path));
            }
        }
        WatermarkMode::Image => {
            if let Some(image_path) = &spec.image_path {
                if image_path.exists() {
                    info!("Watermark image found: {:?}", image_path);
                } else {
                    error!("Watermark image missing: {:?}", image_path);
                    errors.push(StartupCheckError::WatermarkImageMissing(image_path.clone()));
                }
            } else {
                info!("No watermark image configured, placeholder tile will be used");
            }
        }
    }

    for source in sources {
        if !source.exists() {
            error!("Source image missing: {:?}", source);
            errors.push(StartupCheckError::SourceMissing(source.clone()));
        }
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        Err(errors)
    }
}
