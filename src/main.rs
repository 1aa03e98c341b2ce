use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beadgrid::assets::{AssetCategory, AssetLoader, AssetSource};
use beadgrid::models::AppConfig;
use beadgrid::rendering::{self, ExportMode, ExportOptions};
use beadgrid::services::{reference_palette, Session};

#[derive(Parser)]
#[command(name = "beadgrid")]
#[command(about = "Beadgrid - palette-constrained pattern grids from images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a PNG image onto a new grid file
    Import {
        /// Source PNG image
        input: PathBuf,

        /// Output grid JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Grid columns (default from config)
        #[arg(long)]
        cols: Option<u32>,

        /// Grid rows (default from config)
        #[arg(long)]
        rows: Option<u32>,

        /// Reduce to this many colors after sampling
        #[arg(short = 'k', long)]
        colors: Option<usize>,
    },
    /// Reduce a grid file to at most K colors
    Reduce {
        /// Grid JSON file
        input: PathBuf,

        /// Target color count (default: max_colors from config)
        #[arg(short = 'k', long)]
        colors: Option<usize>,

        /// Output grid JSON file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a grid file to PNG
    Export {
        /// Grid JSON file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// What to draw
        #[arg(short, long, value_enum, default_value = "decorated")]
        mode: ExportMode,

        /// Pixels per cell (default from config)
        #[arg(long)]
        cell_size: Option<u32>,
    },
    /// Write a grid's palette to a palette file
    Palette {
        /// Grid JSON file
        input: PathBuf,

        /// Output palette JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Palette name
        #[arg(long, default_value = "Untitled")]
        name: String,

        /// Palette description
        #[arg(long, default_value = "")]
        description: String,

        /// Re-extract the palette from the grid's colors instead of using the saved one
        #[arg(long)]
        extract: bool,
    },
    /// Extract embedded defaults to the filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract reference_palette.json
        #[arg(long)]
        reference_palette: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Import {
            input,
            output,
            cols,
            rows,
            colors,
        }) => {
            init_logging();
            run_import_command(&input, &output, cols, rows, colors)
        }
        Some(Commands::Reduce {
            input,
            colors,
            output,
        }) => {
            init_logging();
            run_reduce_command(&input, colors, output.as_deref())
        }
        Some(Commands::Export {
            input,
            output,
            mode,
            cell_size,
        }) => {
            init_logging();
            run_export_command(&input, &output, mode, cell_size)
        }
        Some(Commands::Palette {
            input,
            output,
            name,
            description,
            extract,
        }) => {
            init_logging();
            run_palette_command(&input, &output, &name, &description, extract)
        }
        Some(Commands::Init {
            config,
            reference_palette,
            all,
            force,
            list,
        }) => run_init_command(config, reference_palette, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadgrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config and reference palette, then build a session for them.
fn open_session(cols: Option<u32>, rows: Option<u32>) -> anyhow::Result<(AppConfig, Session)> {
    let loader = AssetLoader::from_env();
    let mut config = AppConfig::load_from_assets(&loader);
    if let Some(cols) = cols {
        config.grid.cols = cols;
    }
    if let Some(rows) = rows {
        config.grid.rows = rows;
    }
    let reference = reference_palette::load(&loader);
    let session = Session::from_config(&config, reference)?;
    Ok((config, session))
}

fn run_import_command(
    input: &Path,
    output: &Path,
    cols: Option<u32>,
    rows: Option<u32>,
    colors: Option<usize>,
) -> anyhow::Result<()> {
    let (_, mut session) = open_session(cols, rows)?;

    let image = rendering::load_png(input)?;
    let histogram = session.load_image(&image)?;
    println!(
        "Sampled {}x{} image onto {}x{} grid ({} colors)",
        image.width(),
        image.height(),
        session.grid().cols(),
        session.grid().rows(),
        histogram.len()
    );

    if let Some(k) = colors {
        let reduction = session.reduce_colors(k)?;
        if !reduction.unchanged {
            println!(
                "Reduced to {} colors in {} iterations",
                reduction.colors.len(),
                reduction.iterations
            );
        }
    }

    session.save_grid(output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_reduce_command(input: &Path, colors: Option<usize>, output: Option<&Path>) -> anyhow::Result<()> {
    let (config, mut session) = open_session(None, None)?;
    session.load_grid(input)?;

    let before = session.grid().distinct_colors().len();
    let k = colors.unwrap_or(config.max_colors);
    let reduction = session.reduce_colors(k)?;

    if reduction.unchanged {
        println!("Grid already has {before} colors (target {k}), nothing to do");
    } else {
        println!(
            "Reduced {before} colors to {} ({} iterations{})",
            session.grid().distinct_colors().len(),
            reduction.iterations,
            if reduction.converged { "" } else { ", not converged" }
        );
    }

    let output = output.unwrap_or(input);
    session.save_grid(output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_export_command(
    input: &Path,
    output: &Path,
    mode: ExportMode,
    cell_size: Option<u32>,
) -> anyhow::Result<()> {
    let (config, mut session) = open_session(None, None)?;
    session.load_grid(input)?;

    let mut options = ExportOptions::from_config(&config);
    if let Some(size) = cell_size {
        options.cell_size = size;
    }

    let png = rendering::export_png(session.grid(), mode, &options)?;
    std::fs::write(output, &png)?;
    println!("Wrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}

fn run_palette_command(
    input: &Path,
    output: &Path,
    name: &str,
    description: &str,
    extract: bool,
) -> anyhow::Result<()> {
    let (_, mut session) = open_session(None, None)?;
    session.load_grid(input)?;
    if extract {
        session.refresh_palette();
    }

    let file = session.export_palette(name, description);
    file.save(output)?;
    println!("Wrote {} ({} colors)", output.display(), file.colors.len());
    Ok(())
}

fn run_init_command(
    config: bool,
    reference_palette: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || reference_palette {
        categories.push(AssetCategory::ReferencePalette);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --reference-palette");
        eprintln!("\nRun 'beadgrid init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} existing files (use --force to overwrite):", report.skipped.len());
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let palette_file = std::env::var("REFERENCE_PALETTE_FILE").ok();

    println!("Beadgrid v{VERSION}");
    println!("Palette-constrained pattern grids from images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE            = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  REFERENCE_PALETTE_FILE = {}",
        palette_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();

    println!("\nAsset Sources:");
    println!("  Config:            {}", describe_source(&loader.config_source()));
    println!(
        "  Reference palette: {}",
        describe_source(&loader.reference_palette_source())
    );

    let config = AppConfig::load_from_assets(&loader);
    let reference = reference_palette::load(&loader);

    println!("\nSettings:");
    println!(
        "  Grid:           {}x{} {} cells",
        config.grid.cols, config.grid.rows, config.grid.geometry
    );
    println!("  Default color:  {}", config.default_color());
    println!("  Palette slots:  {}", config.palette_slots);
    println!("  History:        {} states", config.history_capacity);
    println!("  Reduce target:  {} colors", config.max_colors);
    println!("  Reference:      {} colors", reference.len());

    println!("\nCommands:");
    println!("  beadgrid import <image.png> -o grid.json   Sample an image onto a grid");
    println!("  beadgrid reduce <grid.json> -k 8           Reduce to 8 colors");
    println!("  beadgrid export <grid.json> -o out.png     Render a PNG");
    println!("  beadgrid palette <grid.json> -o pal.json   Save the palette");
    println!("  beadgrid init --all                        Extract default assets");
}

fn describe_source(source: &AssetSource) -> String {
    match source {
        AssetSource::Embedded => "embedded".to_string(),
        AssetSource::External(path) => path.display().to_string(),
        AssetSource::Missing(path) => format!("{} (not found)", path.display()),
    }
}
