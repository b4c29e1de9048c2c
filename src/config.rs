// src/config.rs

//! Configuration loading utilities.
//!
//! This module resolves the effective `Config` for a run: the TOML file (or
//! defaults when it is absent), then environment overrides for the Lambda
//! runtime, then explicit command-line overrides.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Config, PublishConfig};

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. A file that exists but
/// fails to parse is an error. Nothing is logged here since the logger is
/// configured from the result.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
}

/// Explicit per-run overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub keyword: Option<String>,
    pub count: Option<u32>,
    pub output: Option<PathBuf>,
    pub bucket: Option<String>,
    /// Disable publishing even when a bucket is configured
    pub no_publish: bool,
}

impl Overrides {
    /// Apply overrides on top of `config`.
    pub fn apply(self, config: &mut Config) {
        if let Some(keyword) = self.keyword {
            config.search.keyword = keyword;
        }
        if let Some(count) = self.count {
            config.search.max_results = count;
        }
        if let Some(output) = self.output {
            config.export.output_path = output;
        }
        if let Some(bucket) = self.bucket {
            set_bucket(config, bucket);
        }
        if self.no_publish {
            config.publish = None;
        }
    }
}

/// Point publishing at `bucket`, keeping any configured prefix and region.
fn set_bucket(config: &mut Config, bucket: String) {
    match config.publish.as_mut() {
        Some(publish) => publish.bucket = bucket,
        None => config.publish = Some(PublishConfig::new(bucket)),
    }
}

/// Override configuration from environment-style variables read through
/// `lookup` (usually `std::env::var`).
///
/// Recognized: `SEARCH_KEYWORD`, `TWEET_COUNT`, `S3_BUCKET`, `S3_PREFIX`,
/// `HTTP_TIMEOUT_SECS`. Unparseable numbers are ignored with a warning.
pub fn apply_overrides_from(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(keyword) = lookup("SEARCH_KEYWORD") {
        config.search.keyword = keyword;
    }

    if let Some(count) = lookup("TWEET_COUNT") {
        match count.parse() {
            Ok(n) => config.search.max_results = n,
            Err(_) => log::warn!("Ignoring invalid TWEET_COUNT '{}'", count),
        }
    }

    if let Some(timeout) = lookup("HTTP_TIMEOUT_SECS") {
        match timeout.parse() {
            Ok(secs) => config.search.timeout_secs = secs,
            Err(_) => log::warn!("Ignoring invalid HTTP_TIMEOUT_SECS '{}'", timeout),
        }
    }

    if let Some(bucket) = lookup("S3_BUCKET").filter(|b| !b.trim().is_empty()) {
        set_bucket(config, bucket);
    }

    if let Some(prefix) = lookup("S3_PREFIX") {
        if let Some(publish) = config.publish.as_mut() {
            publish.key_prefix = prefix;
        }
    }
}
