use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Extensions accepted by the original file dialog.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to read directory entry: {0}")]
    WalkError(#[from] walkdir::Error),
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Build the selection set: explicit paths in the order given,
/// followed by a sorted one-level scan of the directory, filtered to
/// image extensions. Each call builds the set wholesale.
pub fn collect_sources(
    paths: &[PathBuf],
    directory: Option<&Path>,
) -> Result<Vec<PathBuf>, SelectionError> {
    let mut sources: Vec<PathBuf> = paths.to_vec();

    if let Some(dir) = directory {
        if !dir.is_dir() {
            return Err(SelectionError::MissingDirectory(dir.to_path_buf()));
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_file() && is_image_file(entry.path()) {
                found.push(entry.path().to_path_buf());
            }
        }
        found.sort();
        debug!("Found {} images in {:?}", found.len(), dir);
        sources.extend(found);
    }

    Ok(sources)
}
