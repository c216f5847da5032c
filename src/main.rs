//! Phishing Verification Pipeline - Main Entry Point
//!
//! Scores a labeled URL dataset group by group with the heuristic indicators,
//! streams the per-record results to the output file and prints the final
//! accuracy report.

use anyhow::{Context, Result};
use phishing_detection_pipeline::{
    config::{AppConfig, LoggingConfig},
    feature_extractor::HeuristicExtractor,
    pipeline::VerificationPipeline,
    writer::read_sample,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    init_logging(&config.logging)?;

    info!("Starting Phishing Verification Pipeline");
    info!(
        input = %config.pipeline.input_path.display(),
        output = %config.pipeline.output_path.display(),
        group_size = config.pipeline.group_size,
        "Configuration loaded successfully"
    );
    info!(
        "Heuristic extractor initialized ({} indicators)",
        HeuristicExtractor::from_config(&config.heuristics).feature_count()
    );

    let mut pipeline = match VerificationPipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(error = %e, "Processing failed before the first group");
            return Err(e).context("Failed to open verification pipeline");
        }
    };

    let report = match pipeline.run() {
        Ok(report) => report,
        Err(e) => {
            let progress = pipeline.progress();
            error!(
                error = %e,
                last_completed_group = ?progress.last_completed_group,
                last_written_url = progress.last_written_url.as_deref().unwrap_or("<none>"),
                rows_written = pipeline.rows_written(),
                records_scored = pipeline.stats().total,
                "Processing failed"
            );
            return Err(e).context("Verification run aborted");
        }
    };

    report.print_summary();

    if let Some(path) = &config.pipeline.report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Run report written");
    }

    if config.pipeline.sample_rows > 0 {
        match read_sample(&config.pipeline.output_path, config.pipeline.sample_rows) {
            Ok(rows) => {
                info!("Sample output:");
                for row in rows {
                    info!(
                        "  {} label={} verdict={} status={}",
                        row.url, row.label, row.final_verdict, row.verification_status
                    );
                }
            }
            Err(e) => warn!(error = %e, "Could not read back sample output"),
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    // RUST_LOG takes precedence over the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid log level {:?}", logging.level))?,
    };

    if logging.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}
