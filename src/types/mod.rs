//! Type definitions for the phishing verification pipeline

pub mod outcome;
pub mod record;

pub use outcome::{OutputRow, VerificationStatus, OUTPUT_COLUMNS};
pub use record::{Label, UrlRecord};
