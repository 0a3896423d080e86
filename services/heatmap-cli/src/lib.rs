//! Engagement heatmap driver.
//!
//! Synthesizes the engagement table, renders it to a PNG and prints a short
//! summary.

pub mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heatmap_common::{EngagementTable, SummaryStats};
use renderer::RenderConfig;
use tracing::info;

/// Header of the console summary.
pub const SUMMARY_TITLE: &str = "Customer Engagement Heatmap Analysis";
/// Last line of the console summary.
pub const SUMMARY_DONE: &str = "Chart generated successfully with heatmap!";

/// One run of the driver.
#[derive(Debug, Clone)]
pub struct Job {
    pub seed: u32,
    pub output: PathBuf,
    pub table_json: Option<PathBuf>,
    pub render: RenderConfig,
}

/// Synthesize, optionally dump the table, render and write the chart.
pub fn run(job: &Job) -> Result<(EngagementTable, SummaryStats)> {
    let table = synthesizer::synthesize(job.seed).context("Failed to synthesize engagement table")?;
    let stats = SummaryStats::from_table(&table);
    info!(seed = job.seed, max = stats.max, min = stats.min, mean = stats.mean, "Synthesized table");

    if let Some(path) = &job.table_json {
        write_table_json(&table, path)?;
    }

    renderer::render_to_file(&table, &job.output, &job.render)
        .with_context(|| format!("Failed to render heatmap to {:?}", job.output))?;

    Ok((table, stats))
}

/// Write the table as JSON, replacing any existing file.
pub fn write_table_json(table: &EngagementTable, path: &Path) -> Result<()> {
    let json = table.to_json().context("Failed to serialize table")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write table JSON to {:?}", path))?;
    info!(path = %path.display(), "Wrote table JSON");
    Ok(())
}

/// Print the console summary.
pub fn write_summary<W: Write>(out: &mut W, stats: &SummaryStats) -> std::io::Result<()> {
    writeln!(out, "{}", SUMMARY_TITLE)?;
    writeln!(out, "{}", "=".repeat(50))?;
    for line in stats.report_lines() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", SUMMARY_DONE)?;
    Ok(())
}
