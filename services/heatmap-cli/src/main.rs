//! Engagement heatmap CLI
//!
//! Generates the seeded engagement table and writes it as a fixed-size PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use heatmap_cli::config::{self, Overrides};
use heatmap_cli::{run, write_summary, Job};
use renderer::ResizeStrategy;
use synthesizer::DEFAULT_SEED;

/// Engagement heatmap generator
#[derive(Parser, Debug)]
#[command(name = "heatmap-cli")]
#[command(about = "Synthesize customer engagement data and render it as an annotated heatmap")]
struct Args {
    /// Output PNG path (overwritten if it exists)
    #[arg(short, long, default_value = "chart.png", env = "HEATMAP_OUTPUT")]
    output: PathBuf,

    /// Random seed for the synthetic table
    #[arg(long, default_value_t = DEFAULT_SEED, env = "HEATMAP_SEED")]
    seed: u32,

    /// How the exact output size is reached: direct or resample [default: direct]
    #[arg(long, env = "HEATMAP_STRATEGY")]
    strategy: Option<ResizeStrategy>,

    /// Output width and height in pixels [default: 512, max: 8192]
    #[arg(long, env = "HEATMAP_SIZE")]
    size: Option<u32>,

    /// YAML render configuration
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// TrueType font for all text (built-in font otherwise)
    #[arg(long, env = "HEATMAP_FONT")]
    font: Option<PathBuf>,

    /// Also write the table as JSON to this path
    #[arg(long)]
    table_json: Option<PathBuf>,

    /// Do not print the summary
    #[arg(long)]
    quiet_summary: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let overrides = Overrides {
        strategy: args.strategy,
        size: args.size,
        font: args.font.clone(),
    };
    let render = config::resolve(args.config.as_deref(), &overrides)?;
    info!(
        output = %args.output.display(),
        strategy = %render.strategy,
        size = render.size,
        "Starting heatmap generation"
    );

    let job = Job {
        seed: args.seed,
        output: args.output,
        table_json: args.table_json,
        render,
    };
    let (_, stats) = run(&job)?;

    if !args.quiet_summary {
        let stdout = std::io::stdout();
        write_summary(&mut stdout.lock(), &stats).context("Failed to print summary")?;
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only the summary.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
