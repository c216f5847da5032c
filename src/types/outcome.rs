//! Verification outcomes and the rows written to the result dataset

use crate::feature_extractor::HeuristicFeatures;
use crate::types::record::{Label, UrlRecord};
use serde::{Deserialize, Serialize};

/// Result dataset header, in column order.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "url",
    "label",
    "has_ip",
    "long_url",
    "uses_https",
    "has_at_symbol",
    "suspicious_words",
    "suspicious_tld",
    "final_verdict",
    "verification_status",
    "processing_time_ms",
];

/// How a record's verdict compares with its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "OK")]
    Match,
    #[serde(rename = "FP")]
    FalsePositive,
    #[serde(rename = "FN")]
    FalseNegative,
    #[serde(rename = "ERROR")]
    ExtractionError,
}

impl VerificationStatus {
    /// Two-branch comparison: equal is a match, a flagged legitimate URL is a
    /// false positive, every other disagreement is a false negative.
    pub fn compare(verdict: Label, label: Label) -> Self {
        if verdict == label {
            VerificationStatus::Match
        } else if verdict == Label::Phishing && label == Label::Legitimate {
            VerificationStatus::FalsePositive
        } else {
            VerificationStatus::FalseNegative
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Match => "OK",
            VerificationStatus::FalsePositive => "FP",
            VerificationStatus::FalseNegative => "FN",
            VerificationStatus::ExtractionError => "ERROR",
        }
    }
}

/// One line of the result dataset. Field order matches [`OUTPUT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub url: String,
    pub label: u8,
    pub has_ip: u8,
    pub long_url: u8,
    pub uses_https: u8,
    pub has_at_symbol: u8,
    pub suspicious_words: u8,
    pub suspicious_tld: u8,
    pub final_verdict: u8,
    pub verification_status: VerificationStatus,
    pub processing_time_ms: f64,
}

impl OutputRow {
    pub fn new(
        record: &UrlRecord,
        features: &HeuristicFeatures,
        verdict: Label,
        status: VerificationStatus,
        processing_time_ms: f64,
    ) -> Self {
        Self {
            url: record.url_text().to_string(),
            label: record.label.as_u8(),
            has_ip: features.has_ip as u8,
            long_url: features.long_url as u8,
            uses_https: features.uses_https as u8,
            has_at_symbol: features.has_at_symbol as u8,
            suspicious_words: features.suspicious_words as u8,
            suspicious_tld: features.suspicious_tld as u8,
            final_verdict: verdict.as_u8(),
            verification_status: status,
            processing_time_ms,
        }
    }
}
