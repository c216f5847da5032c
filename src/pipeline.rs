//! Chunked batch verification pipeline.
//!
//! Groups are read, scored and flushed strictly one after another, so peak
//! memory is bounded by the group size and output order equals input order.
//! A fatal error stops the run; rows already flushed stay in the output.

use crate::config::{AppConfig, HeuristicsConfig};
use crate::error::PipelineResult;
use crate::feature_extractor::HeuristicExtractor;
use crate::metrics::{RunReport, RunStatistics};
use crate::reader::GroupReader;
use crate::types::outcome::OutputRow;
use crate::types::record::UrlRecord;
use crate::writer::ResultWriter;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Where a run got to, for diagnosing a fatal error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProgress {
    /// Zero-based index of the last group fully written
    pub last_completed_group: Option<usize>,
    /// URL of the last row flushed to the output
    pub last_written_url: Option<String>,
}

/// Score a group of records, updating `stats` once per record.
///
/// Output rows come back in input order.
pub fn process_group(
    extractor: &HeuristicExtractor,
    records: &[UrlRecord],
    stats: &mut RunStatistics,
) -> Vec<OutputRow> {
    records
        .iter()
        .map(|record| {
            let start = Instant::now();
            let eval = extractor.evaluate(record);
            let elapsed = start.elapsed();

            stats.record(eval.status, elapsed);
            OutputRow::new(
                record,
                &eval.features,
                eval.verdict,
                eval.status,
                elapsed.as_secs_f64() * 1000.0,
            )
        })
        .collect()
}

/// One verification run over an input dataset.
pub struct VerificationPipeline<R: Read, W: Write> {
    reader: GroupReader<R>,
    writer: ResultWriter<W>,
    extractor: HeuristicExtractor,
    stats: RunStatistics,
    progress: RunProgress,
    groups_completed: usize,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl VerificationPipeline<File, File> {
    /// Open the input, resolve its schema and create the output with its header.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        input_path: P,
        output_path: Q,
        group_size: usize,
        heuristics: &HeuristicsConfig,
    ) -> PipelineResult<Self> {
        let reader = GroupReader::open(input_path, group_size)?;
        let writer = ResultWriter::create(output_path)?;
        Ok(Self::from_parts(
            reader,
            writer,
            HeuristicExtractor::from_config(heuristics),
        ))
    }

    /// Open using the paths and parameters from configuration.
    pub fn from_config(config: &AppConfig) -> PipelineResult<Self> {
        Self::open(
            &config.pipeline.input_path,
            &config.pipeline.output_path,
            config.pipeline.group_size,
            &config.heuristics,
        )
    }
}

impl<R: Read, W: Write> VerificationPipeline<R, W> {
    pub fn from_parts(
        reader: GroupReader<R>,
        writer: ResultWriter<W>,
        extractor: HeuristicExtractor,
    ) -> Self {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, "Verification run started");

        Self {
            reader,
            writer,
            extractor,
            stats: RunStatistics::new(),
            progress: RunProgress::default(),
            groups_completed: 0,
            run_id,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Read the next group of records, `None` at end of input.
    pub fn next_group(&mut self) -> PipelineResult<Option<Vec<UrlRecord>>> {
        self.reader.next_group()
    }

    /// Score one group against this run's statistics.
    pub fn process_group(&mut self, records: &[UrlRecord]) -> Vec<OutputRow> {
        process_group(&self.extractor, records, &mut self.stats)
    }

    /// Append one scored group to the output and mark it completed.
    pub fn append_results(&mut self, rows: &[OutputRow]) -> PipelineResult<()> {
        self.writer.append_group(rows)?;

        self.progress.last_completed_group = Some(self.groups_completed);
        self.progress.last_written_url = self.writer.last_url().map(str::to_string);
        self.groups_completed += 1;
        Ok(())
    }

    /// Process every remaining group, then finalize.
    pub fn run(&mut self) -> PipelineResult<RunReport> {
        while let Some(records) = self.next_group()? {
            let group_start = Instant::now();
            let group_index = self.groups_completed;
            info!(group = group_index + 1, urls = records.len(), "Processing group");

            let rows = self.process_group(&records);
            self.append_results(&rows)?;

            info!(
                group = group_index + 1,
                elapsed_secs = format!("{:.2}", group_start.elapsed().as_secs_f64()),
                accuracy = format!("{:.2}%", self.stats.accuracy().unwrap_or(0.0) * 100.0),
                "Group completed"
            );
        }

        debug!(lines = self.reader.lines_read(), "Input exhausted");
        self.finalize()
    }

    /// Build the aggregate report. Fails with `EmptyInput` when nothing ran.
    pub fn finalize(&self) -> PipelineResult<RunReport> {
        RunReport::from_stats(
            self.run_id,
            self.started_at,
            &self.stats,
            self.groups_completed,
            self.started.elapsed(),
        )
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    pub fn progress(&self) -> &RunProgress {
        &self.progress
    }

    pub fn rows_written(&self) -> u64 {
        self.writer.rows_written()
    }

    /// Finish the run and give back the output sink.
    pub fn into_writer(self) -> PipelineResult<W> {
        self.writer.into_inner()
    }
}
