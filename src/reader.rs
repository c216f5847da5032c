//! Grouped reader for labeled URL datasets

use crate::error::{PipelineError, PipelineResult, SchemaError};
use crate::types::record::{Label, UrlRecord};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Header names accepted for the URL column (case-insensitive)
pub const URL_ALIASES: [&str; 3] = ["url", "website", "link"];
/// Header names accepted for the label column (case-insensitive)
pub const LABEL_ALIASES: [&str; 3] = ["label", "phish", "status"];

/// Positions of the URL and label columns, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub url: usize,
    pub label: usize,
    pub url_header: String,
    pub label_header: String,
}

impl ColumnMapping {
    /// Resolve both columns from a header row. The leftmost alias match wins.
    pub fn resolve(headers: &StringRecord) -> Result<Self, SchemaError> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
        };
        let header_list = || headers.iter().map(str::to_string).collect::<Vec<_>>();

        let url = find(&URL_ALIASES[..]).ok_or_else(|| SchemaError::MissingUrlColumn {
            headers: header_list(),
        })?;
        let label = find(&LABEL_ALIASES[..]).ok_or_else(|| SchemaError::MissingLabelColumn {
            headers: header_list(),
        })?;

        Ok(Self {
            url,
            label,
            url_header: headers[url].to_string(),
            label_header: headers[label].to_string(),
        })
    }
}

/// Reads an input dataset in bounded groups of records.
pub struct GroupReader<R: Read> {
    reader: csv::Reader<R>,
    mapping: ColumnMapping,
    group_size: usize,
    row: StringRecord,
    lines_read: u64,
}

impl GroupReader<File> {
    /// Open a dataset file and resolve its schema.
    pub fn open<P: AsRef<Path>>(path: P, group_size: usize) -> PipelineResult<Self> {
        let file = File::open(path.as_ref())?;
        let reader = Self::from_reader(file, group_size)?;
        info!(
            path = %path.as_ref().display(),
            url_column = %reader.mapping.url_header,
            label_column = %reader.mapping.label_header,
            group_size,
            "Input dataset opened"
        );
        Ok(reader)
    }
}

impl<R: Read> GroupReader<R> {
    /// Wrap any CSV source. Fails on a zero group size or an unusable header.
    pub fn from_reader(source: R, group_size: usize) -> PipelineResult<Self> {
        if group_size == 0 {
            return Err(PipelineError::InvalidGroupSize);
        }

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
        let mapping = ColumnMapping::resolve(reader.headers()?)?;

        Ok(Self {
            reader,
            mapping,
            group_size,
            row: StringRecord::new(),
            lines_read: 0,
        })
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Data lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Read the next group, `None` once the input is exhausted.
    ///
    /// A label that cannot be coerced to 0/1 fails the whole group.
    pub fn next_group(&mut self) -> PipelineResult<Option<Vec<UrlRecord>>> {
        let mut group = Vec::with_capacity(self.group_size.min(4096));

        while group.len() < self.group_size && self.reader.read_record(&mut self.row)? {
            self.lines_read += 1;
            let line = self.lines_read;

            let url = self
                .row
                .get(self.mapping.url)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);
            let label = Label::parse_cell(self.row.get(self.mapping.label).unwrap_or(""), line)?;

            group.push(UrlRecord { line, url, label });
        }

        Ok((!group.is_empty()).then_some(group))
    }
}
