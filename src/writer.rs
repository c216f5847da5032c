//! Append-only sink for verification results

use crate::error::PipelineResult;
use crate::types::outcome::{OutputRow, OUTPUT_COLUMNS};
use csv::WriterBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Writes result rows group by group. The header goes out exactly once,
/// when the sink is created.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: u64,
    last_url: Option<String>,
}

impl ResultWriter<File> {
    /// Create (or truncate) the output file and write its header.
    pub fn create<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let file = File::create(path.as_ref())?;
        info!(path = %path.as_ref().display(), "Output dataset created");
        Self::from_writer(file)
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn from_writer(sink: W) -> PipelineResult<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
        writer.write_record(OUTPUT_COLUMNS)?;
        writer.flush()?;

        Ok(Self {
            writer,
            rows_written: 0,
            last_url: None,
        })
    }

    /// Append one group of rows in order and flush once.
    pub fn append_group(&mut self, rows: &[OutputRow]) -> PipelineResult<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;

        self.rows_written += rows.len() as u64;
        if let Some(last) = rows.last() {
            self.last_url = Some(last.url.clone());
        }
        debug!(rows = rows.len(), total_rows = self.rows_written, "Group appended");
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// URL of the last row known to be flushed to the sink.
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Give back the underlying sink.
    pub fn into_inner(self) -> PipelineResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

/// Columns echoed back from a finished result dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SampleRow {
    pub url: String,
    pub label: u8,
    pub final_verdict: u8,
    pub verification_status: String,
}

/// Read the first `limit` rows of a result dataset.
pub fn read_sample<P: AsRef<Path>>(path: P, limit: usize) -> PipelineResult<Vec<SampleRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::with_capacity(limit);
    for row in reader.deserialize::<SampleRow>().take(limit) {
        rows.push(row?);
    }
    Ok(rows)
}
