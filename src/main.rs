use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use sukashi::{Config, export, selection, startup_checks, watermark};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watermark every selected image and export it at each configured output size
    Apply {
        /// Image files to process, in order
        paths: Vec<PathBuf>,

        /// Also scan this directory (one level) for images
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },

    /// Composite the watermark onto a single image and write the result
    Preview {
        /// Image file to preview
        path: PathBuf,

        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set up logging first
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = if cli.config.exists() {
        let config_content = std::fs::read_to_string(&cli.config)?;
        toml_edit::de::from_str::<Config>(&config_content)?
    } else {
        info!("Config file not found at {:?}, using defaults", cli.config);
        Config::default()
    };

    info!("Starting {}", config.app.name);

    match cli.command {
        Commands::Apply { paths, directory } => run_apply(config, paths, directory),
        Commands::Preview { path, output } => run_preview(config, path, output),
    }
}

fn run_apply(
    config: Config,
    paths: Vec<PathBuf>,
    directory: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = selection::collect_sources(&paths, directory.as_deref())?;
    if sources.is_empty() {
        warn!("No images selected.");
        return Err(Box::new(export::ExportError::EmptySelection));
    }
    info!("Selected {} images", sources.len());

    match startup_checks::perform_startup_checks(&config.watermark, &sources) {
        Ok(()) => {}
        Err(errors) => {
            for error in &errors {
                tracing::error!("Startup check failed: {}", error);
            }
            if errors.iter().any(|e| e.is_critical()) {
                return Err("Critical startup check failed".into());
            }
            warn!("Non-critical startup checks failed, continuing");
        }
    }

    let tile = watermark::generate_tile(&config.watermark)?;
    let summary = export::export_batch(&sources, &tile, &config.output.sizes)?;

    info!(
        "Watermark applied: {} files written across {} output sizes",
        summary.written.len(),
        config.output.sizes.len()
    );
    if !summary.failed.is_empty() {
        warn!("{} sources failed to export", summary.failed.len());
        return Err("Some sources failed to export".into());
    }

    Ok(())
}

fn run_preview(
    config: Config,
    path: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = config
        .output
        .sizes
        .first()
        .copied()
        .unwrap_or(sukashi::ImageSizeConfig::new(800, 800));

    let img = image::open(&path)?;
    let canvas = export::aspect_fit(&img, size.width, size.height);
    let preview = watermark::apply_watermark(&canvas, &config.watermark)?;

    image::DynamicImage::ImageRgba8(preview)
        .to_rgb8()
        .save(&output)?;
    info!("Preview written to {:?}", output);

    Ok(())
}
