//! Model-input features shared with the external trainer and checker.
//!
//! These 13 fields are a different schema from the pipeline's six heuristic
//! indicators and the two must never be mixed.

pub mod explain;
pub mod features;

pub use explain::{describe, explain};
pub use features::{ModelFeatureExtractor, ModelFeatures};
