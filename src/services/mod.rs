//! Service layer for the sentiment pipeline.
//!
//! This module contains the business logic for:
//! - Post retrieval (`TwitterClient`, `PostSource`)
//! - Polarity scoring (`SentimentScorer`, `LexiconScorer`)

mod lexicon;
mod scorer;
mod search;

pub use lexicon::LexiconScorer;
pub use scorer::{PolarityScorer, SentimentScorer, clean_text};
pub use search::{PostSource, SearchQuery, TwitterClient};
