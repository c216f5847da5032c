//! Phishing Detection Pipeline Library
//!
//! Heuristic URL phishing verification over labeled datasets, processed in
//! bounded groups and streamed to an append-only result file.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod model_input;
pub mod pipeline;
pub mod reader;
pub mod types;
pub mod writer;

pub use config::AppConfig;
pub use error::{ExtractionFailed, PipelineError, SchemaError};
pub use feature_extractor::{HeuristicExtractor, HeuristicFeatures};
pub use metrics::{RunReport, RunStatistics};
pub use model_input::{ModelFeatureExtractor, ModelFeatures};
pub use pipeline::{process_group, RunProgress, VerificationPipeline};
pub use reader::GroupReader;
pub use types::{Label, OutputRow, UrlRecord, VerificationStatus};
pub use writer::ResultWriter;
