//! Batch driver: pairs selected images with their SVG drawings and
//! writes one caption text file (and optionally one rendered PNG) per
//! plan identifier.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use caption_engine::{caption_for_svg, CaptionStyle};
use svg_rasterizer::{rasterize_plan, RasterOptions};

#[derive(Parser)]
#[command(
    name = "caption-pipeline",
    about = "Derive captions and raster images from floor-plan drawings"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one caption text file per selected image
    Captions {
        /// Directory of selected PNG images; file stems are the plan ids
        images_dir: PathBuf,
        /// Root directory holding one <id>/model.svg per plan
        svg_root: PathBuf,
        /// Output directory for <id>.txt caption files
        captions_dir: PathBuf,
        /// Caption style to emit
        #[arg(long, value_enum, default_value_t = StyleArg::Rich)]
        style: StyleArg,
        /// Seed the template draws for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Render each drawing to a cropped square PNG
    Render {
        /// Root directory holding one <id>/model.svg per plan
        svg_root: PathBuf,
        /// Output directory for <id>.png files
        out_dir: PathBuf,
        /// Edge length of the square output images
        #[arg(long, default_value_t = 512)]
        size: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Basic,
    Rich,
}

impl std::fmt::Display for StyleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleArg::Basic => write!(f, "basic"),
            StyleArg::Rich => write!(f, "rich"),
        }
    }
}

impl From<StyleArg> for CaptionStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Basic => CaptionStyle::Basic,
            StyleArg::Rich => CaptionStyle::Rich,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchSummary {
    processed: usize,
    skipped: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Captions {
            images_dir,
            svg_root,
            captions_dir,
            style,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run_captions(&images_dir, &svg_root, &captions_dir, style.into(), &mut rng)?;
        }
        Command::Render {
            svg_root,
            out_dir,
            size,
        } => {
            run_render(&svg_root, &out_dir, size)?;
        }
    }

    Ok(())
}

/// Produce one caption file per selected image. Per-item failures
/// (missing drawing, malformed drawing) are logged and skipped; they
/// never abort the batch.
fn run_captions<R: Rng>(
    images_dir: &Path,
    svg_root: &Path,
    captions_dir: &Path,
    style: CaptionStyle,
    rng: &mut R,
) -> Result<BatchSummary> {
    fs::create_dir_all(captions_dir)
        .with_context(|| format!("creating {}", captions_dir.display()))?;

    let ids = selected_plan_ids(images_dir)?;
    info!("found {} selected images", ids.len());

    let mut summary = BatchSummary::default();
    for id in &ids {
        let svg_path = svg_root.join(id).join("model.svg");
        if !svg_path.exists() {
            warn!("drawing not found for {}, skipping", id);
            summary.skipped += 1;
            continue;
        }

        let svg = match fs::read_to_string(&svg_path) {
            Ok(svg) => svg,
            Err(e) => {
                warn!("failed to read {}: {}, skipping", svg_path.display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let caption = match caption_for_svg(&svg, style, rng) {
            Ok(caption) => caption,
            Err(e) => {
                warn!("failed to parse drawing for {}: {}, skipping", id, e);
                summary.skipped += 1;
                continue;
            }
        };

        let out_file = captions_dir.join(format!("{}.txt", id));
        fs::write(&out_file, &caption).with_context(|| format!("writing {}", out_file.display()))?;

        info!("{}.png -> {}.txt :: {}", id, id, caption);
        summary.processed += 1;
    }

    info!(
        "captions done: {} written, {} skipped",
        summary.processed, summary.skipped
    );
    Ok(summary)
}

/// Render every drawing under the root to a cropped square PNG. Same
/// per-item skip policy as the caption pass.
fn run_render(svg_root: &Path, out_dir: &Path, size: u32) -> Result<BatchSummary> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let opts = RasterOptions {
        output_size: size,
        ..RasterOptions::default()
    };

    let mut folders: Vec<PathBuf> = fs::read_dir(svg_root)
        .with_context(|| format!("reading {}", svg_root.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    let mut summary = BatchSummary::default();
    for folder in &folders {
        let Some(id) = folder.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let svg_path = folder.join("model.svg");
        if !svg_path.exists() {
            continue;
        }

        let out_path = out_dir.join(format!("{}.png", id));
        match render_one(&svg_path, &out_path, &opts) {
            Ok(()) => {
                info!("{} -> {}", id, out_path.display());
                summary.processed += 1;
            }
            Err(e) => {
                warn!("failed on {}: {}", id, e);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "render done: {} written, {} skipped",
        summary.processed, summary.skipped
    );
    Ok(summary)
}

fn render_one(svg_path: &Path, out_path: &Path, opts: &RasterOptions) -> Result<()> {
    let svg = fs::read_to_string(svg_path)?;
    let img = rasterize_plan(&svg, opts)?;
    img.save(out_path)?;
    Ok(())
}

/// Plan identifiers are the stems of the PNG files in the images
/// directory, in sorted order.
fn selected_plan_ids(images_dir: &Path) -> Result<Vec<String>> {
    let mut ids = Vec::new();

    for entry in
        fs::read_dir(images_dir).with_context(|| format!("reading {}", images_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.push(stem.to_string());
        }
    }

    ids.sort();
    Ok(ids)
}
