use serde::{Deserialize, Serialize};

pub mod export;
pub mod selection;
pub mod startup_checks;
pub mod watermark;

pub use watermark::{WatermarkMode, WatermarkSpec};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub watermark: WatermarkSpec,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output sizes to export; each gets its own sibling folder named
    /// "{width}x{height}" next to the first selected source.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<ImageSizeConfig>,
}

fn default_sizes() -> Vec<ImageSizeConfig> {
    vec![ImageSizeConfig::new(800, 800), ImageSizeConfig::new(1000, 1500)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageSizeConfig {
    pub width: u32,
    pub height: u32,
}

impl ImageSizeConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Folder name for this output size, e.g. "800x800".
    pub fn folder_name(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            watermark: WatermarkSpec::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Sukashi".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
        }
    }
}
