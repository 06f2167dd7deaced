//! overlay_layout - run the detection overlay layout for one frame
//!
//! Reads a detection list (or synthesizes one), maps it onto a surface of the
//! given size and prints the render list as JSON.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use detection_overlay::{
    BackendRegistry, BoundingBox, ClassNames, Detection, FrameInfo, OverlayConfig,
    OverlayPipeline, RenderItem, Rotation, Size, StubBackend, SyntheticBackend,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of detections in source-image pixels.
    #[arg(long, conflicts_with = "synthetic")]
    detections: Option<PathBuf>,
    /// Generate random detections instead of reading a file.
    #[arg(long)]
    synthetic: bool,
    /// Seed for --synthetic.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Source frame size in sensor orientation, e.g. 640x480.
    #[arg(long, value_parser = parse_dimensions)]
    source: Dimensions,
    /// Clockwise rotation that brings the frame upright (0, 90, 180, 270).
    #[arg(long, default_value_t = 0)]
    rotation: u32,
    /// Surface size in pixels, e.g. 1080x1920.
    #[arg(long, value_parser = parse_dimensions)]
    view: Dimensions,
    /// Class names file (one name per line). Overrides the config file.
    #[arg(long)]
    names: Option<PathBuf>,
    /// Config file (JSON or TOML). Defaults to $OVERLAY_CONFIG.
    #[arg(long, env = "OVERLAY_CONFIG")]
    config: Option<PathBuf>,
    /// Write a PNG preview of boxes and label chips (needs the `raster` feature).
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug)]
struct Dimensions {
    width: u32,
    height: u32,
}

/// Detection as accepted on input: the class name may be omitted and is then
/// looked up in the class-name table.
#[derive(Deserialize)]
struct InputDetection {
    class_id: u32,
    class_name: Option<String>,
    confidence: f32,
    bounding_box: BoundingBox,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = OverlayConfig::load_from(args.config.as_deref())?;
    let names = match args.names.as_ref().or(cfg.class_names.as_ref()) {
        Some(path) => ClassNames::load(path)?,
        None => ClassNames::default(),
    };

    let mut registry = BackendRegistry::new();
    if args.synthetic {
        registry.register(SyntheticBackend::with_names(args.seed, names))?;
    } else {
        let path = args
            .detections
            .as_ref()
            .ok_or_else(|| anyhow!("either --detections or --synthetic is required"))?;
        let mut backend = StubBackend::new();
        backend.push_frame(read_detections(path, &names)?);
        registry.register(backend)?;
    }
    registry.set_thresholds(cfg.thresholds)?;

    let frame = FrameInfo::new(
        args.source.width,
        args.source.height,
        Rotation::from_degrees(args.rotation)?,
    );
    let view = Size::new(args.view.width as f32, args.view.height as f32);

    let mut pipeline = OverlayPipeline::new(registry, cfg.engine());
    let items = match pipeline.process(&[], &frame, view)? {
        Some(overlay) => {
            log::info!(
                "laid out {} detections ({} labels still overlapping)",
                overlay.items.len(),
                overlay.report.overlapping_labels
            );
            overlay.items
        }
        None => {
            log::info!("source frame has a zero dimension, nothing to lay out");
            Vec::new()
        }
    };

    write_preview(&args, &items)?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

#[cfg(feature = "raster")]
fn write_preview(args: &Args, items: &[RenderItem]) -> Result<()> {
    let Some(path) = &args.png else {
        return Ok(());
    };
    let mut image = image::RgbaImage::new(args.view.width, args.view.height);
    detection_overlay::render::draw_render_list(&mut image, items, 2);
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("preview written to {}", path.display());
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn write_preview(args: &Args, _items: &[RenderItem]) -> Result<()> {
    match &args.png {
        Some(_) => Err(anyhow!("--png requires building with the `raster` feature")),
        None => Ok(()),
    }
}

fn read_detections(path: &Path, names: &ClassNames) -> Result<Vec<Detection>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read detections {}", path.display()))?;
    let input: Vec<InputDetection> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid detections file {}", path.display()))?;
    Ok(input
        .into_iter()
        .map(|det| match det.class_name {
            Some(name) => Detection::new(det.class_id, name, det.confidence, det.bounding_box),
            None => names.detection(det.class_id, det.confidence, det.bounding_box),
        })
        .collect())
}

fn parse_dimensions(value: &str) -> Result<Dimensions, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in '{}'", value))?;
    let height = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in '{}'", value))?;
    Ok(Dimensions { width, height })
}
