// src/pipeline/run.rs

//! Stage orchestration: Authenticate → Fetch → Score → Export → Summarize → Publish.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{AnalyzedRecord, Config};
use crate::services::{PolarityScorer, PostSource, SearchQuery, SentimentScorer, TwitterClient};
use crate::storage::{ArtifactPublisher, PublishStatus};
use crate::utils::console;

use super::assemble::analyze_posts;
use super::export::{ExportArtifact, write_csv};
use super::summary::SummaryReport;

const TOTAL_STEPS: usize = 5;

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub keyword: String,
    pub fetched: usize,
    pub output_path: PathBuf,
    pub summary: Option<SummaryReport>,
    pub publish: PublishStatus,
    #[serde(skip)]
    pub records: Vec<AnalyzedRecord>,
}

/// Run the pipeline with the given collaborators.
///
/// Fetch, export, and empty results abort the run. A publish failure is
/// reported in `RunReport::publish` and the run still succeeds.
pub async fn run_pipeline<S: PolarityScorer>(
    config: &Config,
    source: &dyn PostSource,
    scorer: &SentimentScorer<S>,
    publisher: Option<&dyn ArtifactPublisher>,
) -> Result<RunReport> {
    let query = SearchQuery::from_config(&config.search);

    // Step 1: Fetch
    console::step(
        1,
        TOTAL_STEPS,
        &format!(
            "Fetching {} tweets about '{}'...",
            query.max_results, query.keyword
        ),
    );
    let posts = source.search(&query).await.inspect_err(|e| {
        console::failure(&format!("Error fetching tweets: {e}"));
    })?;

    if posts.is_empty() {
        console::failure("No tweets found for the given query");
        return Err(AppError::no_results(&query.keyword));
    }
    console::success(&format!("Successfully fetched {} tweets", posts.len()));

    // Step 2: Score + assemble
    console::step(2, TOTAL_STEPS, "Performing sentiment analysis...");
    let records = analyze_posts(&posts, scorer);

    // Step 3: Export
    console::step(3, TOTAL_STEPS, "Saving results to CSV...");
    let artifact = write_csv(&config.export.output_path, &records)
        .await
        .inspect_err(|e| {
            console::failure(&format!("Error saving to CSV: {e}"));
        })?;
    console::success(&format!("Results saved to {}", artifact.path.display()));

    // Step 4: Summarize
    console::step(4, TOTAL_STEPS, "Summarizing...");
    let summary = SummaryReport::from_records(&records);
    match &summary {
        Some(report) => console::summary(report, Some(&query.keyword)),
        None => console::sub_item("No results to summarize"),
    }

    // Step 5: Publish (optional)
    console::step(5, TOTAL_STEPS, "Uploading to object storage...");
    let publish = publish_artifact(&artifact, publisher).await;

    Ok(RunReport {
        keyword: query.keyword,
        fetched: posts.len(),
        output_path: artifact.path,
        summary,
        publish,
        records,
    })
}

/// Publish the artifact if a publisher is configured. Never fails the run.
async fn publish_artifact(
    artifact: &ExportArtifact,
    publisher: Option<&dyn ArtifactPublisher>,
) -> PublishStatus {
    let Some(publisher) = publisher else {
        console::sub_item("⚠ Skipped: no publish bucket configured");
        return PublishStatus::Skipped;
    };

    match publisher.publish(&artifact.path).await {
        Ok(location) => {
            console::success(&format!("File uploaded: {location}"));
            PublishStatus::Published { location }
        }
        Err(e) => {
            log::error!("Publish failed: {}", e);
            console::failure(&format!("Error uploading: {e}"));
            console::sub_item("Make sure your AWS credentials are configured correctly");
            PublishStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Run the pipeline against the live search provider and object store.
pub async fn run(config: &Config) -> Result<RunReport> {
    console::header("TWEET SENTIMENT ANALYSIS");
    log::info!("Connecting to search API...");
    let source = TwitterClient::authenticate(&config.search).inspect_err(|e| {
        console::failure(&format!("Error connecting to search API: {e}"));
    })?;
    console::success("Search API credentials loaded");

    let scorer = SentimentScorer::from_config(&config.scoring);

    #[cfg(feature = "s3")]
    let publisher = match &config.publish {
        Some(publish) => Some(crate::storage::S3Publisher::from_config(publish).await),
        None => None,
    };
    #[cfg(feature = "s3")]
    let publisher_ref = publisher
        .as_ref()
        .map(|p| p as &dyn ArtifactPublisher);

    #[cfg(not(feature = "s3"))]
    let publisher_ref: Option<&dyn ArtifactPublisher> = {
        if config.publish.is_some() {
            log::warn!("Publish target configured but built without the `s3` feature");
        }
        None
    };

    run_pipeline(config, &source, &scorer, publisher_ref).await
}
