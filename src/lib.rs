//! Latency report for the market-data scoring pipeline.
//!
//! Reads the per-event trace (`subject_id`, `num_updates` and five
//! lifecycle timestamps), derives network / calculation / total latency
//! in microseconds and writes one self-contained HTML report with summary
//! and per-group statistics, per-group histograms and the full table.

pub mod chart;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod trace;

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

pub use config::ReportConfig;
pub use error::{ReportError, Result};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: usize,
    pub groups: usize,
    pub output: PathBuf,
}

/// Load → derive → aggregate → chart → render → write.
///
/// The page is built entirely in memory; the output file is only touched
/// once everything else has succeeded.
pub fn run(cfg: &ReportConfig) -> Result<RunSummary> {
    info!(path = %cfg.input_path.display(), "loading data");
    let records = trace::load_trace(&cfg.input_path)?;
    let rows = trace::derive_all(records);
    info!(rows = rows.len(), "trace loaded");

    let report = report::build_report(&rows, cfg, Utc::now())?;
    write_report(cfg, &report.html)?;
    info!(path = %cfg.output_path.display(), "report written");

    Ok(RunSummary {
        rows: rows.len(),
        groups: report.groups,
        output: cfg.output_path.clone(),
    })
}

/// Overwrite the output file, creating its directory if needed.
fn write_report(cfg: &ReportConfig, html: &str) -> Result<()> {
    let path = &cfg.output_path;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
    }
    fs::write(path, html).map_err(|e| ReportError::io(path, e))
}
