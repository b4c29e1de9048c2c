// src/models/mod.rs

//! Domain models for the sentiment pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod post;
mod record;
mod sentiment;

// Re-export all public types
pub use config::{
    Config, ExportConfig, LoggingConfig, PROVIDER_MAX_RESULTS, PublishConfig, ScoringConfig,
    SearchConfig,
};
pub use post::{Post, PublicMetrics};
pub use record::{AnalyzedRecord, EXPORT_COLUMNS, round_polarity};
pub use sentiment::{SentimentLabel, SentimentResult};
