// src/models/record.rs

//! Flattened per-post export row.

use serde::{Deserialize, Serialize};

use crate::models::SentimentLabel;

/// Column names of the exported file, in order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "tweet_id",
    "text",
    "created_at",
    "sentiment",
    "polarity_score",
    "retweet_count",
    "like_count",
];

/// A post joined with its sentiment, ready for tabular export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedRecord {
    pub tweet_id: String,

    /// Post text with line breaks replaced by spaces
    pub text: String,

    /// Provider timestamp, not reformatted
    pub created_at: String,

    pub sentiment: SentimentLabel,

    /// Polarity rounded to 3 decimals
    pub polarity_score: f64,

    pub retweet_count: u64,

    pub like_count: u64,
}

impl AnalyzedRecord {
    /// Row values in `EXPORT_COLUMNS` order.
    pub fn to_row(&self) -> [String; 7] {
        [
            self.tweet_id.clone(),
            self.text.clone(),
            self.created_at.clone(),
            self.sentiment.to_string(),
            format!("{:.3}", self.polarity_score),
            self.retweet_count.to_string(),
            self.like_count.to_string(),
        ]
    }
}

/// Round a polarity to 3 decimal places.
pub fn round_polarity(polarity: f64) -> f64 {
    (polarity * 1000.0).round() / 1000.0
}
