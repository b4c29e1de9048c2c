// src/pipeline/assemble.rs

//! Joins posts with their sentiment into export rows.

use crate::models::{AnalyzedRecord, Post, SentimentResult, round_polarity};
use crate::services::{PolarityScorer, SentimentScorer, clean_text};
use crate::utils::console;

/// Build one record from a post and its sentiment.
pub fn assemble_record(post: &Post, sentiment: &SentimentResult) -> AnalyzedRecord {
    AnalyzedRecord {
        tweet_id: post.id.clone(),
        text: clean_text(&post.text),
        created_at: post.created_at.clone(),
        sentiment: sentiment.label,
        polarity_score: round_polarity(sentiment.polarity),
        retweet_count: post.retweet_count(),
        like_count: post.like_count(),
    }
}

/// Build records 1:1 from paired posts and results, preserving order.
pub fn assemble_records(posts: &[Post], sentiments: &[SentimentResult]) -> Vec<AnalyzedRecord> {
    debug_assert_eq!(posts.len(), sentiments.len());
    posts
        .iter()
        .zip(sentiments)
        .map(|(post, sentiment)| assemble_record(post, sentiment))
        .collect()
}

/// Score every post and assemble its record, reporting one line per post.
pub fn analyze_posts<S: PolarityScorer>(
    posts: &[Post],
    scorer: &SentimentScorer<S>,
) -> Vec<AnalyzedRecord> {
    let sentiments: Vec<SentimentResult> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let result = scorer.score(&post.text);
            console::sub_item(&console::post_line(i + 1, &result));
            log::debug!("Tweet {} ({}) scored {}", i + 1, post.id, result.polarity);
            result
        })
        .collect();

    assemble_records(posts, &sentiments)
}
