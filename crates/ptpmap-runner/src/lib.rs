//! # ptpmap-runner
//!
//! CLI runner for the link-reconstruction pipeline: load the licensing
//! extract, reconstruct links, write the KML overlay and the diagnostic log,
//! and report summary counts.

mod log_sink;

pub use log_sink::WriterSink;

use clap::Parser;
use ptpmap_kml::KmlError;
use ptpmap_link::{match_links, LinkOutcome};
use ptpmap_loader::{LoadStats, LoaderError};
use ptpmap_model::{ModelError, PtpMapConfig};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the `ptpmap` binary.
#[derive(Debug, Parser)]
#[command(name = "ptpmap")]
#[command(about = "Reconstruct point-to-point microwave links from a spectrum-licensing extract")]
pub struct Args {
    /// Input licensing extract (headerless TAFL CSV).
    pub input: PathBuf,

    /// Output KML overlay path.
    #[arg(short, long, default_value = "ptpmap.kml")]
    pub output: PathBuf,

    /// Optional YAML configuration (service codes, multipoint allow-list,
    /// style table).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Diagnostic log file for mismatched/ambiguous/unresolved links.
    #[arg(short, long, default_value = "ptpmap-log.txt")]
    pub log_file: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(#[from] ModelError),

    /// Input extract could not be read.
    #[error("load error: {0}")]
    Load(#[from] LoaderError),

    /// Overlay output could not be written.
    #[error("KML output error: {0}")]
    Kml(#[from] KmlError),

    /// Diagnostic log or other output file could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Loader counters.
    pub load: LoadStats,
    /// Links resolved to a single endpoint.
    pub resolved: usize,
    /// Links resolved as multipoint.
    pub resolved_multipoint: usize,
    /// Ambiguous links (logged, not rendered).
    pub ambiguous: usize,
    /// Unresolved links (logged, not rendered).
    pub unresolved: usize,
    /// Of the resolved links, how many used the frequency-mismatch fallback.
    pub frequency_fallbacks: usize,
    /// Line segments written to the overlay.
    pub segments: usize,
}

/// Build the log filter for a run.
///
/// `env_directives` are the `RUST_LOG`-style directives from the
/// environment, if any; the default level is `info` without them. The
/// verbose flag then raises the default level to `debug` on top of
/// whatever the environment specified, so it is never silently ignored.
pub fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    let mut filter = match env_directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new("info"),
    };
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }
    filter
}

/// Execute the full pipeline: load, match, render.
pub fn run(args: &Args) -> Result<RunSummary> {
    let config = match &args.config {
        Some(path) => PtpMapConfig::from_yaml_file(path)?,
        None => PtpMapConfig::default(),
    };

    let load_start = Instant::now();
    let loaded = ptpmap_loader::load_file(&args.input, &config.loader)?;
    info!(
        elapsed_ms = load_start.elapsed().as_millis() as u64,
        tx = loaded.stats.tx_rows,
        rx = loaded.stats.rx_rows,
        "found {} TX licenses and {} RX licenses",
        loaded.stats.tx_rows,
        loaded.stats.rx_rows
    );

    let mut sink = WriterSink::create(&args.log_file)?;
    let links = match_links(&loaded.tx, &loaded.rx, &config.matcher, &mut sink);
    // All diagnostics are emitted during matching; flush now so they
    // survive even when rendering fails below.
    sink.flush()?;

    let mut summary = RunSummary {
        load: loaded.stats,
        ..RunSummary::default()
    };
    for link in &links {
        match link.outcome {
            LinkOutcome::Resolved => summary.resolved += 1,
            LinkOutcome::ResolvedMultipoint => summary.resolved_multipoint += 1,
            LinkOutcome::Ambiguous => summary.ambiguous += 1,
            LinkOutcome::Unresolved => summary.unresolved += 1,
        }
        if link.frequency_fallback {
            summary.frequency_fallbacks += 1;
        }
    }

    let out = std::io::BufWriter::new(std::fs::File::create(&args.output)?);
    summary.segments = ptpmap_kml::write_document(&links, &config.styles, out)?;

    info!(
        resolved = summary.resolved,
        multipoint = summary.resolved_multipoint,
        ambiguous = summary.ambiguous,
        unresolved = summary.unresolved,
        fallbacks = summary.frequency_fallbacks,
        segments = summary.segments,
        "run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        let verbose = log_filter(true, None).to_string();
        assert!(verbose.contains("debug"), "filter was {:?}", verbose);
    }

    #[test]
    fn test_verbose_raises_level_over_environment_directives() {
        // Without the flag the environment wins unchanged
        assert_eq!(log_filter(false, Some("warn")).to_string(), "warn");
        // With the flag, a debug default is layered on top instead of the
        // flag being silently ignored
        let filter = log_filter(true, Some("warn")).to_string();
        assert!(filter.contains("debug"), "filter was {:?}", filter);
    }
}
