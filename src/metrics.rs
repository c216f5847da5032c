//! Run statistics and the final report for the verification pipeline.

use crate::error::PipelineError;
use crate::types::outcome::VerificationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Latency samples kept for percentile estimates
const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Accumulator for one pipeline run.
///
/// Owned by the run that created it and passed explicitly to every group,
/// so concurrent runs (or tests) never share counters.
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub total: u64,
    pub correct: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub extraction_errors: u64,
    /// Per-record processing times (in microseconds)
    processing_times: Vec<u64>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed record.
    pub fn record(&mut self, status: VerificationStatus, processing_time: Duration) {
        self.total += 1;
        match status {
            VerificationStatus::Match => self.correct += 1,
            VerificationStatus::FalsePositive => self.false_positives += 1,
            VerificationStatus::FalseNegative => self.false_negatives += 1,
            VerificationStatus::ExtractionError => self.extraction_errors += 1,
        }

        self.processing_times.push(processing_time.as_micros() as u64);
        // Keep only the most recent samples for memory efficiency
        if self.processing_times.len() > MAX_LATENCY_SAMPLES {
            self.processing_times.drain(0..MAX_LATENCY_SAMPLES / 2);
        }
    }

    /// Records whose verdict could be compared with the label.
    pub fn compared(&self) -> u64 {
        self.correct + self.false_positives + self.false_negatives
    }

    /// Accuracy so far, `None` before the first record.
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct, self.total)
    }

    /// Get processing time statistics
    pub fn processing_stats(&self) -> ProcessingStats {
        if self.processing_times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted = self.processing_times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }
}

fn ratio(part: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64)
}

/// Processing time statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Aggregate report emitted when a run finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: u64,
    pub correct: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub extraction_errors: u64,
    pub groups: usize,
    pub elapsed_secs: f64,
    /// Records per second
    pub throughput: f64,
    pub accuracy: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub latency: ProcessingStats,
}

impl RunReport {
    /// Build the report from the final statistics.
    ///
    /// An empty run has no defined rates and is reported as `EmptyInput`.
    pub fn from_stats(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        stats: &RunStatistics,
        groups: usize,
        elapsed: Duration,
    ) -> Result<Self, PipelineError> {
        if stats.total == 0 {
            return Err(PipelineError::EmptyInput);
        }

        let total = stats.total as f64;
        let elapsed_secs = elapsed.as_secs_f64();

        Ok(Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            total: stats.total,
            correct: stats.correct,
            false_positives: stats.false_positives,
            false_negatives: stats.false_negatives,
            extraction_errors: stats.extraction_errors,
            groups,
            elapsed_secs,
            throughput: if elapsed_secs > 0.0 {
                total / elapsed_secs
            } else {
                0.0
            },
            accuracy: stats.correct as f64 / total,
            false_positive_rate: stats.false_positives as f64 / total,
            false_negative_rate: stats.false_negatives as f64 / total,
            latency: stats.processing_stats(),
        })
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║          PHISHING VERIFICATION PIPELINE - FINAL REPORT       ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ URLs Processed: {:>10}  │  Throughput: {:>10.0} URLs/s ║",
            self.total, self.throughput
        );
        info!(
            "║ Groups:         {:>10}  │  Total time: {:>10.2} s      ║",
            self.groups, self.elapsed_secs
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Accuracy:        {:>7.2}%                                    ║", self.accuracy * 100.0);
        info!(
            "║ False Positives: {:>10} ({:>6.2}%)                         ║",
            self.false_positives,
            self.false_positive_rate * 100.0
        );
        info!(
            "║ False Negatives: {:>10} ({:>6.2}%)                         ║",
            self.false_negatives,
            self.false_negative_rate * 100.0
        );
        info!(
            "║ Extraction Errors: {:>8}                                   ║",
            self.extraction_errors
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Processing Time (μs): mean={:>5} p50={:>5} p95={:>5} p99={:>5} ║",
            self.latency.mean_us, self.latency.p50_us, self.latency.p95_us, self.latency.p99_us
        );
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_recording() {
        let mut stats = RunStatistics::new();

        stats.record(VerificationStatus::Match, Duration::from_micros(100));
        stats.record(VerificationStatus::FalsePositive, Duration::from_micros(200));
        stats.record(VerificationStatus::FalseNegative, Duration::from_micros(300));
        stats.record(VerificationStatus::ExtractionError, Duration::from_micros(400));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.compared(), 3);
        assert_eq!(stats.extraction_errors, 1);
        assert_eq!(stats.accuracy(), Some(0.25));
        assert_eq!(stats.processing_stats().mean_us, 250);
        assert_eq!(stats.processing_stats().max_us, 400);
    }

    #[test]
    fn test_latency_buffer_is_bounded() {
        let mut stats = RunStatistics::new();
        for _ in 0..(MAX_LATENCY_SAMPLES + 1) {
            stats.record(VerificationStatus::Match, Duration::from_micros(1));
        }
        assert_eq!(stats.total, MAX_LATENCY_SAMPLES as u64 + 1);
        assert!(stats.processing_stats().count <= MAX_LATENCY_SAMPLES as u64);
    }

    #[test]
    fn test_empty_run_has_no_report() {
        let stats = RunStatistics::new();
        assert_eq!(stats.accuracy(), None);

        let result = RunReport::from_stats(Uuid::new_v4(), Utc::now(), &stats, 0, Duration::ZERO);
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn test_report_rates() {
        let mut stats = RunStatistics::new();
        stats.record(VerificationStatus::Match, Duration::from_micros(10));
        stats.record(VerificationStatus::Match, Duration::from_micros(10));
        stats.record(VerificationStatus::FalsePositive, Duration::from_micros(10));
        stats.record(VerificationStatus::FalseNegative, Duration::from_micros(10));

        let report =
            RunReport::from_stats(Uuid::new_v4(), Utc::now(), &stats, 2, Duration::from_secs(2))
                .unwrap();

        assert_eq!(report.accuracy, 0.5);
        assert_eq!(report.false_positive_rate, 0.25);
        assert_eq!(report.false_negative_rate, 0.25);
        assert_eq!(report.throughput, 2.0);
        assert_eq!(report.groups, 2);
    }
}
