//! Sentiment scoring for journal entries.
//!
//! A hosted text-classification model is used when a token is configured;
//! otherwise, and whenever the remote call fails, a keyword heuristic
//! produces the result. Callers always get a normalized [`Sentiment`].

pub mod classifier;
pub mod heuristic;
pub mod labels;
pub mod response;

pub use classifier::{ClassifierConfig, ClassifierError, ClassifierMode, SentimentClassifier};
pub use heuristic::heuristic_sentiment;
pub use labels::normalize_label;

use mood_types::Emotion;

/// Neutral score used when nothing better is known.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// A normalized classification result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub label: Emotion,
    pub score: f64,
    pub emoji: &'static str,
}

impl Sentiment {
    /// Builds a result, clamping the score into `[0, 1]`. Non-finite
    /// scores become [`NEUTRAL_SCORE`].
    pub fn new(label: Emotion, score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            NEUTRAL_SCORE
        };

        Self {
            label,
            score,
            emoji: label.emoji(),
        }
    }

    pub fn neutral() -> Self {
        Self::new(Emotion::Neutral, NEUTRAL_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_clamped() {
        assert_eq!(Sentiment::new(Emotion::Positive, 1.7).score, 1.0);
        assert_eq!(Sentiment::new(Emotion::Negative, -0.2).score, 0.0);
        assert_eq!(Sentiment::new(Emotion::Neutral, f64::NAN).score, NEUTRAL_SCORE);
    }

    #[test]
    fn emoji_follows_label() {
        let s = Sentiment::new(Emotion::Negative, 0.9);
        assert_eq!(s.emoji, Emotion::Negative.emoji());
    }
}
