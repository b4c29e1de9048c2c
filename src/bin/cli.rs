//! Tweet Sentiment CLI
//!
//! Local execution entry point. For AWS Lambda, use `tweet-sentiment-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tweet_sentiment::{
    config::{Overrides, load_config},
    error::Result,
    pipeline::{self, SummaryReport},
    services::SentimentScorer,
    utils::console,
};

/// Tweet Sentiment - keyword sentiment snapshots
#[derive(Parser, Debug)]
#[command(
    name = "tweet-sentiment",
    version,
    about = "Fetch recent tweets, score their sentiment, and export a CSV report"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress the console report
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: Fetch → Score → Export → Summarize → Publish
    Run {
        /// Keyword to search for
        #[arg(short, long)]
        keyword: Option<String>,

        /// Number of tweets to fetch (1-100)
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// S3 bucket to upload the CSV to
        #[arg(long, conflicts_with = "no_publish")]
        bucket: Option<String>,

        /// Skip the upload even when a bucket is configured
        #[arg(long)]
        no_publish: bool,
    },

    /// Print the sentiment summary of an exported CSV
    Summarize {
        /// Path to a CSV written by `run`
        csv: PathBuf,
    },

    /// Score one or more texts with the configured lexicon
    Score {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool, default_level: &str) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        default_level
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    console::init(!cli.quiet);

    let mut config = load_config(&cli.config)?;
    init_logging(cli.verbose, cli.quiet, &config.logging.level);

    if cli.config.exists() {
        log::info!("Loaded configuration from {}", cli.config.display());
    } else {
        log::warn!(
            "Config file {} not found. Using default configuration.",
            cli.config.display()
        );
    }

    match cli.command {
        Command::Run {
            keyword,
            count,
            output,
            bucket,
            no_publish,
        } => {
            Overrides {
                keyword,
                count,
                output,
                bucket,
                no_publish,
            }
            .apply(&mut config);
            config.validate()?;

            let report = pipeline::run(&config).await?;
            match serde_json::to_string(&report) {
                Ok(json) => log::debug!("Run report: {}", json),
                Err(e) => log::warn!("Could not serialize run report: {}", e),
            }

            console::header("ANALYSIS COMPLETE");
            console::sub_item(&format!("Output file: {}", report.output_path.display()));
        }

        Command::Summarize { csv } => {
            let records = pipeline::read_records(&csv).await?;
            log::info!("Loaded {} records from {}", records.len(), csv.display());

            match SummaryReport::from_records(&records) {
                Some(report) => console::summary(&report, None),
                None => console::sub_item("No results to summarize"),
            }
        }

        Command::Score { texts } => {
            config.validate()?;
            let scorer = SentimentScorer::from_config(&config.scoring);
            for text in &texts {
                let result = scorer.score(text);
                println!("{:<8} {:>7.3}  {}", result.label.as_str(), result.polarity, text);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            match config.search.resolve_bearer_token() {
                Ok(_) => log::info!("✓ Bearer token available"),
                Err(e) => log::warn!("{}", e),
            }
            match &config.publish {
                Some(publish) => log::info!(
                    "✓ Publishing to s3://{}/{}",
                    publish.bucket, publish.key_prefix
                ),
                None => log::info!("Publishing disabled (no [publish] section)"),
            }
        }
    }

    Ok(())
}
