//! Error types for the verification pipeline

use thiserror::Error;

/// Fatal pipeline errors. Any of these stops the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("no records were processed, run statistics are undefined")]
    EmptyInput,

    #[error("line {line}: label {value:?} is not 0 or 1")]
    InvalidLabel { line: u64, value: String },

    #[error("group size must be at least 1")]
    InvalidGroupSize,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input header does not expose a recognizable URL or label column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("no URL column (expected one of url/website/link) in header {headers:?}")]
    MissingUrlColumn { headers: Vec<String> },

    #[error("no label column (expected one of label/phish/status) in header {headers:?}")]
    MissingLabelColumn { headers: Vec<String> },
}

/// Marker for a record whose URL could not be parsed into features.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feature extraction failed: {reason}")]
pub struct ExtractionFailed {
    pub reason: String,
}

impl ExtractionFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
