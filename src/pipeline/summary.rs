// src/pipeline/summary.rs

//! Aggregate sentiment summary over a run's records.

use serde::Serialize;

use crate::models::{AnalyzedRecord, SentimentLabel};

/// Mean polarity above which the run is called positive.
const OVERALL_POSITIVE_THRESHOLD: f64 = 0.1;
/// Mean polarity below which the run is called negative.
const OVERALL_NEGATIVE_THRESHOLD: f64 = -0.1;

/// Per-label counts and mean polarity for a non-empty record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean of the stored (rounded) polarities
    pub mean_polarity: f64,
    pub overall: SentimentLabel,
}

impl SummaryReport {
    /// Summarize records. Returns `None` for an empty slice.
    pub fn from_records(records: &[AnalyzedRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut report = Self {
            total: records.len(),
            positive: 0,
            negative: 0,
            neutral: 0,
            mean_polarity: 0.0,
            overall: SentimentLabel::Neutral,
        };

        let mut total_polarity = 0.0;
        for record in records {
            match record.sentiment {
                SentimentLabel::Positive => report.positive += 1,
                SentimentLabel::Negative => report.negative += 1,
                SentimentLabel::Neutral => report.neutral += 1,
            }
            total_polarity += record.polarity_score;
        }

        report.mean_polarity = total_polarity / report.total as f64;
        report.overall = overall_label(report.mean_polarity);
        Some(report)
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Share of records carrying `label`, in percent.
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        self.count(label) as f64 / self.total as f64 * 100.0
    }
}

/// Overall label from mean polarity, with a neutral band of ±0.1.
pub fn overall_label(mean_polarity: f64) -> SentimentLabel {
    if mean_polarity > OVERALL_POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if mean_polarity < OVERALL_NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
