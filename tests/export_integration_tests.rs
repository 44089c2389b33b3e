use image::{GenericImageView, Rgba, RgbaImage};
use std::path::PathBuf;
use tempfile::TempDir;

use sukashi::watermark::{WatermarkMode, WatermarkSpec, generate_tile};
use sukashi::{Config, export};

/// Image-mode spec backed by a file on disk, so no font is needed.
fn image_mode_spec(dir: &TempDir) -> WatermarkSpec {
    let mark_path = dir.path().join("mark.png");
    RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 100]))
        .save(&mark_path)
        .unwrap();

    WatermarkSpec {
        mode: WatermarkMode::Image,
        image_path: Some(mark_path),
        scale: 2,
        ..WatermarkSpec::default()
    }
}

fn write_source(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    // RGB so the fixture encodes for every target extension, JPEG included.
    image::RgbImage::from_pixel(width, height, image::Rgb([50, 100, 150]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_batch_export_writes_two_files_per_source() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();

    let sources = vec![
        write_source(&temp_dir, "portrait.png", 300, 600),
        write_source(&temp_dir, "landscape.jpg", 640, 480),
        write_source(&temp_dir, "square.bmp", 256, 256),
    ];

    let spec = image_mode_spec(&temp_dir);
    let tile = generate_tile(&spec).unwrap();
    assert_eq!(tile.dimensions(), (40, 20));

    let summary = export::export_batch(&sources, &tile, &config.output.sizes).unwrap();
    assert_eq!(summary.written.len(), 6);
    assert!(summary.failed.is_empty());

    for folder in ["800x800", "1000x1500"] {
        let out_dir = temp_dir.path().join(folder);
        assert!(out_dir.is_dir());
        for name in ["portrait.png", "landscape.jpg", "square.bmp"] {
            assert!(out_dir.join(name).is_file(), "{folder}/{name} missing");
        }
    }

    // Outputs are exactly the target canvas sizes, letterboxing included.
    let out_800 = image::open(temp_dir.path().join("800x800/portrait.png")).unwrap();
    assert_eq!(out_800.dimensions(), (800, 800));
    let out_1000 = image::open(temp_dir.path().join("1000x1500/landscape.jpg")).unwrap();
    assert_eq!(out_1000.dimensions(), (1000, 1500));
}

#[test]
fn test_letterbox_bands_are_white_before_compositing() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "wide.png", 400, 100);

    // Fully transparent tile leaves the letterboxed canvas untouched.
    let tile = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
    let sizes = vec![sukashi::ImageSizeConfig::new(800, 800)];

    let summary = export::export_batch(std::slice::from_ref(&source), &tile, &sizes).unwrap();
    assert_eq!(summary.written.len(), 1);

    let out = image::open(&summary.written[0]).unwrap().to_rgb8();
    // 4:1 source in a square canvas: white band above, content centered.
    assert_eq!(*out.get_pixel(400, 10), image::Rgb([255, 255, 255]));
    // Lanczos resampling of the uniform fill can shift values by one.
    let content = out.get_pixel(400, 400);
    for (got, want) in content.0.iter().zip([50u8, 100, 150]) {
        assert!((*got as i32 - want as i32).abs() <= 1, "got {:?}", content);
    }
}

#[test]
fn test_corrupt_source_is_collected_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_source(&temp_dir, "good.png", 128, 128);
    let bad = temp_dir.path().join("bad.png");
    std::fs::write(&bad, b"not an image").unwrap();

    let tile = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 64]));
    let sizes = vec![
        sukashi::ImageSizeConfig::new(800, 800),
        sukashi::ImageSizeConfig::new(1000, 1500),
    ];

    let summary = export::export_batch(&[good, bad.clone()], &tile, &sizes).unwrap();
    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, bad);
}

#[test]
fn test_empty_selection_writes_nothing() {
    let tile = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 64]));
    let result = export::export_batch(&[], &tile, &Config::default().output.sizes);
    assert!(matches!(result, Err(export::ExportError::EmptySelection)));
}

#[test]
fn test_opacity_zero_output_matches_plain_letterbox() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "photo.png", 200, 200);

    let sizes = vec![sukashi::ImageSizeConfig::new(800, 800)];

    // Opaque tile with its alpha zeroed, as the generator produces for
    // opacity = 0.
    let transparent_tile = RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 0]));
    let summary =
        export::export_batch(std::slice::from_ref(&source), &transparent_tile, &sizes).unwrap();
    let with_invisible_mark = image::open(&summary.written[0]).unwrap().to_rgb8();

    let plain = export::aspect_fit(&image::open(&source).unwrap(), 800, 800);
    let plain_rgb = image::DynamicImage::ImageRgba8(plain).to_rgb8();

    assert_eq!(with_invisible_mark.as_raw(), plain_rgb.as_raw());
}
