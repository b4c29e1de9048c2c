// src/services/lexicon.rs

//! General-purpose English polarity lexicon.
//!
//! Rule-based scoring in the spirit of pattern/TextBlob:
//! 1. Look up word polarities
//! 2. A negator flips and halves the next sentiment word
//! 3. An intensifier scales the next sentiment word
//! 4. Average the matched scores, amplify slightly on `!`, clamp to [-1, 1]

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use super::scorer::PolarityScorer;

/// Factor applied to a negated word's polarity.
const NEGATION_FACTOR: f64 = -0.5;

/// Tokens after a negator that it can still reach ("not a good day").
const NEGATION_WINDOW: usize = 2;
/// Tokens after an intensifier that it can still reach.
const INTENSIFIER_WINDOW: usize = 1;

/// Per-`!` amplification, capped at three marks.
const EXCLAMATION_BOOST: f64 = 0.1;
const MAX_EXCLAMATIONS: usize = 3;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("easy", 0.43),
    ("efficient", 0.5),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("powerful", 0.3),
    ("reliable", 0.5),
    ("secure", 0.4),
    ("simple", 0.2),
    ("smooth", 0.4),
    ("solid", 0.3),
    ("stable", 0.3),
    ("super", 0.33),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("win", 0.8),
    ("wonderful", 1.0),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("buggy", -0.5),
    ("confusing", -0.3),
    ("crash", -0.6),
    ("crashed", -0.6),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("down", -0.16),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.32),
    ("frustrating", -0.4),
    ("hard", -0.3),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("problem", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unstable", -0.4),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
    ("outage", -0.6),
    ("outages", -0.6),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "none", "cannot", "cant", "can't",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt",
    "aren't", "arent", "wasn't", "wasnt", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.2),
    ("totally", 1.3),
    ("incredibly", 1.5),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("kinda", 0.7),
];

/// Word-level polarity lexicon.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Create a scorer with the built-in lexicon.
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(w, m)| (w.to_string(), *m))
            .collect();

        Self {
            words,
            intensifiers,
        }
    }

    /// Create a scorer with extra or overriding word polarities.
    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Self {
        let mut scorer = Self::new();
        for (word, score) in overrides {
            scorer
                .words
                .insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
        }
        scorer
    }

    /// Number of words with a polarity.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get polarity for a word
    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word)
    }

    /// Scores of the sentiment words in `text`, with modifiers applied.
    fn matched_scores(&self, text: &str) -> Vec<f64> {
        let mut scores = Vec::new();
        // Remaining reach of the last negator / intensifier, in tokens.
        let mut negation_left = 0;
        let mut intensifier_left: usize = 0;
        let mut intensifier: f64 = 1.0;

        for word in text.unicode_words() {
            let word = word.to_lowercase();

            if Self::is_negation(&word) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(mut score) = self.words.get(&word).copied() {
                if intensifier_left > 0 {
                    score *= intensifier;
                }
                if negation_left > 0 {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score);
                negation_left = 0;
                intensifier_left = 0;
                continue;
            }

            negation_left = negation_left.saturating_sub(1);
            intensifier_left = intensifier_left.saturating_sub(1);

            if let Some(mult) = self.intensifiers.get(&word) {
                intensifier = *mult;
                intensifier_left = INTENSIFIER_WINDOW;
            }
        }

        scores
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let scores = self.matched_scores(text);
        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let boosted = mean * (1.0 + EXCLAMATION_BOOST * exclamations as f64);

        boosted.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_words_are_neutral() {
        let lexicon = LexiconScorer::new();
        assert_eq!(lexicon.polarity("Just using AWS"), 0.0);
        assert_eq!(lexicon.polarity(""), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        let lexicon = LexiconScorer::new();
        assert!(lexicon.polarity("AWS is great!") > 0.0);
        assert!(lexicon.polarity("AWS outage again") < 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let lexicon = LexiconScorer::new();
        let plain = lexicon.polarity("this is good");
        let negated = lexicon.polarity("this is not good");
        assert!(negated < 0.0);
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_negation_reaches_one_intervening_word() {
        let lexicon = LexiconScorer::new();
        assert!(lexicon.polarity("not a good day") < 0.0);
        assert!(lexicon.polarity("not very good") < 0.0);
    }

    #[test]
    fn test_negation_does_not_carry_across_the_sentence() {
        let lexicon = LexiconScorer::new();
        let plain = lexicon.polarity("AWS is great");
        assert!(plain > 0.0);
        assert_eq!(lexicon.polarity("No doubt AWS is great"), plain);
    }

    #[test]
    fn test_intensifier_only_reaches_next_word() {
        let lexicon = LexiconScorer::new();
        let plain = lexicon.polarity("good");
        assert_eq!(lexicon.polarity("very much AWS good"), plain);
        assert!(lexicon.polarity("very good") > plain);
    }

    #[test]
    fn test_intensifier_scales_next_word() {
        let lexicon = LexiconScorer::new();
        let plain = lexicon.polarity("good");
        let intense = lexicon.polarity("very good");
        assert!(intense > plain);
    }

    #[test]
    fn test_exclamation_amplifies_but_stays_bounded() {
        let lexicon = LexiconScorer::new();
        assert!(lexicon.polarity("nice!") > lexicon.polarity("nice"));
        assert_eq!(lexicon.polarity("perfect!!!!!!"), 1.0);
        assert_eq!(lexicon.polarity("worst!!!"), -1.0);
    }

    #[test]
    fn test_mean_of_matches() {
        let lexicon = LexiconScorer::new();
        // good (0.7) and bad (-0.7) cancel out
        assert!(lexicon.polarity("good and bad").abs() < 1e-12);
    }

    #[test]
    fn test_case_insensitive() {
        let lexicon = LexiconScorer::new();
        assert_eq!(lexicon.polarity("GREAT"), lexicon.polarity("great"));
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("Serverless".to_string(), 0.5);
        overrides.insert("good".to_string(), -3.0);

        let lexicon = LexiconScorer::with_overrides(&overrides);
        assert_eq!(lexicon.word_score("serverless"), Some(0.5));
        assert_eq!(lexicon.word_score("good"), Some(-1.0));
        assert!(lexicon.len() > POSITIVE_WORDS.len());
    }
}
