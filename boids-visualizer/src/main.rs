use anyhow::{Context, Result};
use boids_common::{SimulationConfig, Snapshot};
use clap::Parser;
use env_logger::Builder;
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info, warn, LevelFilter};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Command-line arguments for the visualizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input snapshot file path (.bin, .json or .msgpack)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the PNG frames are written to
    #[arg(short, long, default_value = "frames")]
    output_dir: PathBuf,

    /// Frame width in pixels (used if config is not provided)
    #[arg(long, default_value_t = 1900)]
    width: u32,

    /// Frame height in pixels (used if config is not provided)
    #[arg(long, default_value_t = 1200)]
    height: u32,

    /// Optional path to the engine's config.toml to take the world bounds from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Radius of each boid in pixels; 0 draws a single pixel
    #[arg(long, default_value_t = 0)]
    point_radius: i32,

    /// Boid color (black, white, red, green, blue, yellow, cyan, magenta)
    #[arg(long, default_value = "white")]
    color: String,

    /// Background color
    #[arg(long, default_value = "black")]
    bg_color: String,
}

// Color definitions for named colors (RGBA format)
const COLOR_MAP: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
];

/// Frame appearance shared by every snapshot.
#[derive(Debug, Clone, Copy)]
struct FrameStyle {
    width: u32,
    height: u32,
    point_radius: i32,
    color: Rgba<u8>,
    bg_color: Rgba<u8>,
}

/// Parse a color name to RGBA values
fn parse_color(color_name: &str) -> [u8; 4] {
    for &(name, color) in COLOR_MAP {
        if name.eq_ignore_ascii_case(color_name) {
            return color;
        }
    }
    warn!("Color '{}' not recognized, using white.", color_name);
    [255, 255, 255, 255]
}

/// Reads snapshots, picking the decoder from the file extension.
///
/// `.bin` files are the engine's bincode stream: a `u32` count, then snapshots.
fn load_snapshots(path: &Path) -> Result<Vec<Snapshot>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let snapshots = match extension.as_str() {
        "bin" => {
            let snapshot_count: u32 = bincode::deserialize_from(&mut reader)
                .context("Failed to read snapshot count from header")?;
            let mut snapshots = Vec::with_capacity(snapshot_count as usize);
            for i in 0..snapshot_count {
                let snapshot: Snapshot = bincode::deserialize_from(&mut reader)
                    .with_context(|| format!("Failed to read snapshot {}", i))?;
                snapshots.push(snapshot);
            }
            snapshots
        }
        "json" => serde_json::from_reader(reader).context("Failed to parse JSON snapshots")?,
        "msgpack" => {
            rmp_serde::from_read(reader).context("Failed to parse MessagePack snapshots")?
        }
        other => anyhow::bail!(
            "Unsupported snapshot file extension '{}' (expected bin, json or msgpack).",
            other
        ),
    };
    Ok(snapshots)
}

/// Draws one snapshot. Positions are already integer pixels; anything off the
/// canvas (the far edge after a wrap) is skipped.
fn draw_frame(snapshot: &Snapshot, style: &FrameStyle) -> RgbaImage {
    let mut image = ImageBuffer::from_pixel(style.width, style.height, style.bg_color);

    if let Some(positions) = &snapshot.positions {
        for &(x, y) in positions {
            if x < 0 || y < 0 || x >= style.width as i32 || y >= style.height as i32 {
                continue;
            }
            if style.point_radius > 0 {
                draw_filled_circle_mut(&mut image, (x, y), style.point_radius, style.color);
            } else {
                image.put_pixel(x as u32, y as u32, style.color);
            }
        }
    }

    image
}

fn frame_path(output_dir: &Path, tick: u32) -> PathBuf {
    output_dir.join(format!("frame_{:06}.png", tick))
}

fn main() -> Result<()> {
    let args = Args::parse();

    Builder::from_default_env()
        .filter(None, LevelFilter::Info)
        .init();

    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    info!("Starting Boids Visualizer...");
    info!("Input file: {}", args.input.display());
    info!("Output directory: {}", args.output_dir.display());

    // --- Determine Frame Dimensions ---
    let (width, height) = match &args.config {
        Some(config_path) => match SimulationConfig::load(config_path) {
            Ok(config) => {
                info!("Loaded world dimensions from {}", config_path.display());
                let params = config.get_flock_params();
                (params.world_width.ceil() as u32, params.world_height.ceil() as u32)
            }
            Err(e) => {
                warn!(
                    "Failed to load config file '{}': {}. Using provided dimensions.",
                    config_path.display(),
                    e
                );
                (args.width, args.height)
            }
        },
        None => (args.width, args.height),
    };
    if width == 0 || height == 0 {
        anyhow::bail!("Frame dimensions must be positive (got {}x{}).", width, height);
    }
    info!("Frame dimensions: {}x{} px", width, height);

    let style = FrameStyle {
        width,
        height,
        point_radius: args.point_radius,
        color: Rgba(parse_color(&args.color)),
        bg_color: Rgba(parse_color(&args.bg_color)),
    };

    // --- Load Snapshots ---
    let snapshots = load_snapshots(&args.input)?;
    info!("Found {} snapshots in the file", snapshots.len());
    if let Some(first) = snapshots.first() {
        debug!(
            "First snapshot: tick={}, boids={}, order={:.3}, has positions={}",
            first.tick,
            first.boid_count,
            first.order_parameter,
            first.positions.is_some()
        );
    }

    let drawable: Vec<&Snapshot> = snapshots.iter().filter(|s| s.positions.is_some()).collect();
    if drawable.is_empty() {
        warn!("No snapshot carries positions (enable save_positions_in_snapshot). Nothing to draw.");
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    let progress_bar = ProgressBar::new(drawable.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) [{eta}]")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let start_time = Instant::now();
    drawable
        .par_iter()
        .progress_with(progress_bar.clone())
        .try_for_each(|snapshot| -> Result<()> {
            let image = draw_frame(snapshot, &style);
            let path = frame_path(&args.output_dir, snapshot.tick);
            image
                .save(&path)
                .with_context(|| format!("Failed to write frame {}", path.display()))
        })?;
    progress_bar.finish_with_message("done");

    let duration = start_time.elapsed();
    info!(
        "Rendered {} frames in {:.2?} ({:.1} frames per second)",
        drawable.len(),
        duration,
        drawable.len() as f64 / duration.as_secs_f64().max(1e-9)
    );
    info!("Frames saved to: {}", args.output_dir.display());

    Ok(())
}
