//! AWS Lambda entry point for Tweet Sentiment
//!
//! Deploy with `cargo lambda build --release --features lambda`
//! and schedule it with an EventBridge rule.

use lambda_runtime::{Error as LambdaError, service_fn};

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tweet_sentiment::{lambda::handler, utils::console};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // CloudWatch receives structured logs only.
    console::init(false);

    info!("Tweet Sentiment Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}
