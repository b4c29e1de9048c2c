// src/models/post.rs

//! Post data structure as returned by the search provider.

use serde::{Deserialize, Serialize};

/// A single post retrieved from the search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Provider-assigned identifier (opaque)
    pub id: String,

    /// Raw post text, possibly containing line breaks
    pub text: String,

    /// Creation timestamp in the provider's native representation
    #[serde(default)]
    pub created_at: String,

    /// Author identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// Language tag detected by the provider
    #[serde(default, rename = "lang", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Engagement counters, omitted by the provider for some posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<PublicMetrics>,
}

/// Engagement counters attached to a post.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicMetrics {
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

impl Post {
    /// Create a post with only the fields the pipeline strictly needs.
    pub fn new(id: impl Into<String>, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at: created_at.into(),
            author_id: None,
            language: None,
            public_metrics: None,
        }
    }

    /// Attach engagement counters.
    pub fn with_metrics(mut self, retweet_count: u64, like_count: u64) -> Self {
        self.public_metrics = Some(PublicMetrics {
            retweet_count,
            like_count,
            ..PublicMetrics::default()
        });
        self
    }

    /// Reshare count, 0 when the provider omitted metrics.
    pub fn retweet_count(&self) -> u64 {
        self.public_metrics.map_or(0, |m| m.retweet_count)
    }

    /// Like count, 0 when the provider omitted metrics.
    pub fn like_count(&self) -> u64 {
        self.public_metrics.map_or(0, |m| m.like_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let json = r#"{
            "id": "1780000000000000001",
            "text": "AWS is great!",
            "created_at": "2024-04-15T10:21:33.000Z",
            "author_id": "42",
            "lang": "en",
            "public_metrics": {"retweet_count": 3, "reply_count": 1, "like_count": 12, "quote_count": 0}
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "1780000000000000001");
        assert_eq!(post.language.as_deref(), Some("en"));
        assert_eq!(post.retweet_count(), 3);
        assert_eq!(post.like_count(), 12);
    }

    #[test]
    fn test_missing_metrics_default_to_zero() {
        let json = r#"{"id": "1", "text": "hello", "created_at": "2024-04-15T10:21:33.000Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.public_metrics.is_none());
        assert_eq!(post.retweet_count(), 0);
        assert_eq!(post.like_count(), 0);
    }
}
