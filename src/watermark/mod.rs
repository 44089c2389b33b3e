pub mod compositor;
mod error;
pub mod generator;
mod types;

pub use compositor::{apply_watermark, tile_watermark};
pub use error::WatermarkError;
pub use generator::generate_tile;
pub use types::{TEXT_TILE_HEIGHT, TEXT_TILE_WIDTH, WatermarkMode, WatermarkSpec};
