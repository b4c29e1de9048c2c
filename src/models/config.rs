//! Application configuration structures.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Largest page the recent-search endpoint returns.
pub const PROVIDER_MAX_RESULTS: u32 = 100;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search query and provider connection settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Tabular export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Object store destination; publishing is skipped when absent
    #[serde(default)]
    pub publish: Option<PublishConfig>,

    /// Polarity lexicon overrides
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.keyword.trim().is_empty() {
            return Err(AppError::validation("search.keyword is empty"));
        }
        if self.search.max_results == 0 || self.search.max_results > PROVIDER_MAX_RESULTS {
            return Err(AppError::validation(format!(
                "search.max_results must be within 1..={PROVIDER_MAX_RESULTS}"
            )));
        }
        if self.search.language.trim().is_empty() {
            return Err(AppError::validation("search.language is empty"));
        }
        if self.search.timeout_secs == 0 {
            return Err(AppError::validation("search.timeout_secs must be > 0"));
        }
        if self.search.user_agent.trim().is_empty() {
            return Err(AppError::validation("search.user_agent is empty"));
        }
        if self.export.output_path.as_os_str().is_empty() {
            return Err(AppError::validation("export.output_path is empty"));
        }
        if let Some(publish) = &self.publish {
            if publish.bucket.trim().is_empty() {
                return Err(AppError::validation("publish.bucket is empty"));
            }
        }
        for (word, weight) in &self.scoring.lexicon {
            if !(-1.0..=1.0).contains(weight) {
                return Err(AppError::validation(format!(
                    "scoring.lexicon weight for '{word}' must be within [-1, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Search provider query and connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keyword searched for
    #[serde(default = "defaults::keyword")]
    pub keyword: String,

    /// Number of posts requested
    #[serde(default = "defaults::max_results")]
    pub max_results: u32,

    /// Language restriction applied to the query
    #[serde(default = "defaults::language")]
    pub language: String,

    /// Drop reshares from the results
    #[serde(default = "defaults::exclude_reshares")]
    pub exclude_reshares: bool,

    /// Provider API root
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Bearer token; prefer `bearer_token_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "defaults::bearer_token_env")]
    pub bearer_token_env: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Resolve the bearer token from config, then from the environment.
    pub fn resolve_bearer_token(&self) -> Result<String> {
        let token = match &self.bearer_token {
            Some(token) => token.clone(),
            None => std::env::var(&self.bearer_token_env).map_err(|_| {
                AppError::auth(format!(
                    "no bearer token configured and ${} is not set",
                    self.bearer_token_env
                ))
            })?,
        };

        if token.trim().is_empty() {
            return Err(AppError::auth("bearer token is empty"));
        }
        Ok(token.trim().to_string())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keyword: defaults::keyword(),
            max_results: defaults::max_results(),
            language: defaults::language(),
            exclude_reshares: defaults::exclude_reshares(),
            api_base_url: defaults::api_base_url(),
            bearer_token: None,
            bearer_token_env: defaults::bearer_token_env(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Tabular export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination of the CSV file, overwritten on every run
    #[serde(default = "defaults::output_path")]
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: defaults::output_path(),
        }
    }
}

/// Object store destination for the exported file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    pub bucket: String,

    /// Key prefix the timestamped file name is placed under
    #[serde(default = "defaults::key_prefix")]
    pub key_prefix: String,

    /// Region override; the SDK default chain applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl PublishConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key_prefix: defaults::key_prefix(),
            region: None,
        }
    }
}

/// Extra or overriding lexicon entries for the polarity scorer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub lexicon: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Search defaults
    pub fn keyword() -> String {
        "AWS".into()
    }
    pub fn max_results() -> u32 {
        10
    }
    pub fn language() -> String {
        "en".into()
    }
    pub fn exclude_reshares() -> bool {
        true
    }
    pub fn api_base_url() -> String {
        "https://api.twitter.com".into()
    }
    pub fn bearer_token_env() -> String {
        "TWITTER_BEARER_TOKEN".into()
    }
    pub fn user_agent() -> String {
        "tweet-sentiment/0.1".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Export defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from("tweet_sentiments.csv")
    }

    // Publish defaults
    pub fn key_prefix() -> String {
        "sentiment_analysis".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
