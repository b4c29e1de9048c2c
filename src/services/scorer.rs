// src/services/scorer.rs

//! Sentiment scoring: text normalization, polarity, and sign labelling.

use crate::models::{ScoringConfig, SentimentResult};

use super::lexicon::LexiconScorer;

/// A polarity function mapping text to a value in [-1, 1].
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Replace line breaks with spaces so the text fits in one CSV field.
pub fn clean_text(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Scores post texts with a pluggable polarity function.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer<S = LexiconScorer> {
    scorer: S,
}

impl SentimentScorer<LexiconScorer> {
    /// Lexicon scorer with the configured overrides merged in.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(LexiconScorer::with_overrides(&config.lexicon))
    }
}

impl<S: PolarityScorer> SentimentScorer<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Score a text. Line breaks are normalized before scoring.
    pub fn score(&self, text: &str) -> SentimentResult {
        let polarity = self.scorer.polarity(&clean_text(text));
        let polarity = if polarity.is_finite() {
            polarity.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        SentimentResult::new(polarity)
    }
}
