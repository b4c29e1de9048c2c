//! Publishing of the exported artifact to remote object storage.
//!
//! Objects are keyed by a prefix, the upload time, and the local file name:
//!
//! ```text
//! {bucket}/
//! └── sentiment_analysis/
//!     ├── 20250114_093012_tweet_sentiments.csv
//!     └── 20250115_093008_tweet_sentiments.csv
//! ```

#[cfg(feature = "s3")]
pub mod s3;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::Result;

#[cfg(feature = "s3")]
pub use s3::S3Publisher;

/// Timestamp layout embedded in object keys.
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Build `{prefix}/{YYYYMMDD_HHMMSS}_{file_name}`.
pub fn object_key(prefix: &str, now: DateTime<Local>, file_name: &str) -> String {
    let stamped = format!("{}_{}", now.format(KEY_TIMESTAMP_FORMAT), file_name);
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        stamped
    } else {
        format!("{prefix}/{stamped}")
    }
}

/// Outcome of the optional publish stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishStatus {
    /// No destination configured
    Skipped,
    Published { location: String },
    /// Upload attempted and failed; the local export remains valid
    Failed { reason: String },
}

impl PublishStatus {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Destination for the exported file.
#[async_trait]
pub trait ArtifactPublisher: Send + Sync {
    /// Upload the file at `path` and return its remote location.
    async fn publish(&self, path: &Path) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_object_key_layout() {
        let key = object_key(
            "sentiment_analysis",
            at(2025, 1, 14, 9, 30, 12),
            "tweet_sentiments.csv",
        );
        assert_eq!(key, "sentiment_analysis/20250114_093012_tweet_sentiments.csv");
    }

    #[test]
    fn test_object_key_trims_prefix_slashes() {
        let key = object_key("/reports/daily/", at(2025, 12, 1, 0, 0, 5), "a.csv");
        assert_eq!(key, "reports/daily/20251201_000005_a.csv");
    }

    #[test]
    fn test_object_key_without_prefix() {
        let key = object_key("", at(2025, 12, 1, 23, 59, 59), "a.csv");
        assert_eq!(key, "20251201_235959_a.csv");
    }

    #[test]
    fn test_publish_status_serialization() {
        let json = serde_json::to_value(PublishStatus::Published {
            location: "s3://bucket/key".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "published");
        assert_eq!(json["location"], "s3://bucket/key");

        let json = serde_json::to_value(PublishStatus::Skipped).unwrap();
        assert_eq!(json["status"], "skipped");
    }
}
