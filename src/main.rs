//! Reformula - rebuild signed-sum formulas in sheets exported as plain values

mod config_path;

use anyhow::{Context, Result};
use clap::Parser;
use reformula_core::{Config, Document};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reformula")]
#[command(
    author,
    version,
    about = "Rebuild subtotal formulas in spreadsheets exported as plain values"
)]
struct Cli {
    /// Input sheet (.csv or .grd); computed cells are wrapped in **…**
    input: PathBuf,

    /// Output file, .csv or .grd (default: <input stem>.transformed.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: <config dir>/reformula/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of preceding values a formula may draw from
    #[arg(long, value_name = "K")]
    max_depth: Option<usize>,

    /// Largest accepted difference between a sum and its target
    #[arg(long, value_name = "EPS")]
    tolerance: Option<f64>,

    /// First data row, 1-based
    #[arg(long, value_name = "R")]
    start_row: Option<usize>,

    /// First data column, 1-based
    #[arg(long, value_name = "C")]
    start_col: Option<usize>,

    /// Print the inferred formulas instead of writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Log every inferred formula and skipped cell
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    debug!(?config, "configuration resolved");

    let mut doc = Document::open(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let resolution = doc.infer_formulas(&config);

    if cli.dry_run {
        for formula in &resolution.formulas {
            println!("{}\t{}", formula.target, doc.sheet.display(&formula.target));
        }
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.input));
        doc.save_as(&output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!(path = %output.display(), "output written");
        println!("Wrote {}", output.display());
    }

    println!(
        "Inferred {} formula(s); {} unresolved, {} skipped",
        resolution.formulas.len(),
        resolution.unresolved.len(),
        resolution.skipped.len()
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file first, then command-line overrides, then validation.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match config_path::default_config_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        },
    };

    if let Some(max_depth) = cli.max_depth {
        config.search.max_depth = max_depth;
    }
    if let Some(tolerance) = cli.tolerance {
        config.search.tolerance = tolerance;
    }
    if let Some(start_row) = cli.start_row {
        config.region.start_row = start_row;
    }
    if let Some(start_col) = cli.start_col {
        config.region.start_col = start_col;
    }

    config.validate()?;
    Ok(config)
}

/// `<dir>/<stem>.transformed.csv` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    input.with_file_name(format!("{}.transformed.csv", stem))
}
