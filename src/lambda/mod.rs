// src/lambda/mod.rs

//! AWS Lambda handler for scheduled sentiment runs.
//!
//! Each invocation:
//! 1. Builds configuration from defaults and environment variables
//! 2. Applies the optional `keyword` / `count` from the payload
//! 3. Runs the pipeline, writing the CSV to `/tmp`
//! 4. Uploads the CSV to the bucket named by `S3_BUCKET`, when set

use std::path::PathBuf;

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::config::{Overrides, apply_overrides_from};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::pipeline;
use crate::storage::PublishStatus;

/// Only `/tmp` is writable inside the Lambda sandbox.
const LAMBDA_OUTPUT_PATH: &str = "/tmp/tweet_sentiments.csv";

/// Lambda invocation payload.
#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    /// Keyword override for this invocation
    pub keyword: Option<String>,

    /// Tweet count override for this invocation
    pub count: Option<u32>,
}

/// Lambda response payload.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,

    pub keyword: String,

    /// Number of tweets fetched and scored
    pub fetched: usize,

    /// Overall label of the run, when there were records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<String>,

    pub publish: PublishStatus,

    /// Pipeline stage that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<String>,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl RunResponse {
    fn failed(keyword: String, err: &AppError) -> Self {
        Self {
            success: false,
            keyword,
            fetched: 0,
            overall: None,
            publish: PublishStatus::Skipped,
            failed_stage: Some(err.stage().to_string()),
            error: Some(err.to_string()),
            execution_time_ms: 0,
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<RunRequest>,
) -> std::result::Result<RunResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!(
        "Starting run: keyword={:?}, count={:?}",
        request.keyword, request.count
    );

    let config = match load_lambda_config(request) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            let mut response = RunResponse::failed(String::new(), &e);
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            return Ok(response);
        }
    };

    let mut response = match pipeline::run(&config).await {
        Ok(report) => {
            info!(
                "Run completed: {} tweets, publish={:?}",
                report.fetched, report.publish
            );
            RunResponse {
                success: true,
                keyword: report.keyword,
                fetched: report.fetched,
                overall: report.summary.map(|s| s.overall.to_string()),
                publish: report.publish,
                failed_stage: None,
                error: None,
                execution_time_ms: 0,
            }
        }
        Err(e) => {
            error!("Run failed at {} stage: {}", e.stage(), e);
            RunResponse::failed(config.search.keyword.clone(), &e)
        }
    };

    response.execution_time_ms = start.elapsed().as_millis() as u64;
    Ok(response)
}

/// Build configuration for the Lambda environment.
fn load_lambda_config(request: RunRequest) -> Result<Config> {
    lambda_config_from(request, |name| std::env::var(name).ok())
}

fn lambda_config_from(
    request: RunRequest,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let mut config = Config::default();
    config.export.output_path = PathBuf::from(LAMBDA_OUTPUT_PATH);

    apply_overrides_from(&mut config, lookup);
    apply_request(&mut config, request);

    if config.publish.is_none() {
        warn!(
            "S3_BUCKET is not set; publish is skipped and {} does not outlive the invocation",
            LAMBDA_OUTPUT_PATH
        );
    }
    config.validate()?;
    Ok(config)
}

fn apply_request(config: &mut Config, request: RunRequest) {
    Overrides {
        keyword: request.keyword,
        count: request.count,
        ..Overrides::default()
    }
    .apply(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_defaults() {
        let req: RunRequest = serde_json::from_str("{}").unwrap();
        assert!(req.keyword.is_none());
        assert!(req.count.is_none());
    }

    #[test]
    fn test_run_request_with_options() {
        let json = r#"{"keyword": "serverless", "count": 20}"#;
        let req: RunRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.keyword.as_deref(), Some("serverless"));
        assert_eq!(req.count, Some(20));
    }

    #[test]
    fn test_request_overrides_config() {
        let mut config = Config::default();
        apply_request(
            &mut config,
            RunRequest {
                keyword: Some("lambda".into()),
                count: Some(42),
            },
        );
        assert_eq!(config.search.keyword, "lambda");
        assert_eq!(config.search.max_results, 42);
        assert!(config.publish.is_none());
    }

    #[test]
    fn test_missing_bucket_skips_publish() {
        let config = lambda_config_from(RunRequest::default(), |_| None).unwrap();
        assert!(config.publish.is_none());
        assert_eq!(config.export.output_path, PathBuf::from(LAMBDA_OUTPUT_PATH));
    }

    #[test]
    fn test_bucket_from_env_enables_publish() {
        let config = lambda_config_from(RunRequest::default(), |name| {
            (name == "S3_BUCKET").then(|| "reports".to_string())
        })
        .unwrap();
        assert_eq!(config.publish.unwrap().bucket, "reports");
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let request = RunRequest {
            keyword: None,
            count: Some(0),
        };
        let err = lambda_config_from(request, |_| None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_failed_response_serialization() {
        let err = AppError::auth("missing token");
        let response = RunResponse::failed("AWS".into(), &err);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["failed_stage"], "authenticate");
        assert_eq!(json["publish"]["status"], "skipped");
        assert!(json.get("overall").is_none());
    }
}
