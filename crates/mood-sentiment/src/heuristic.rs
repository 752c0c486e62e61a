use mood_types::Emotion;

use crate::{NEUTRAL_SCORE, Sentiment};

const POSITIVE_KEYWORDS: &[&str] = &[
    "happy", "joy", "great", "good", "love", "amazing", "wonderful", "excited", "proud", "grateful",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad", "bad", "angry", "terrible", "hate", "upset", "awful", "depressed", "anxious", "worried",
];

const BASE_SCORE: f64 = 0.6;
const STEP_PER_HIT: f64 = 0.1;

/// Keyword-counting estimate used when the remote model is unavailable.
///
/// Each keyword counts once if it appears anywhere in the lowercased text
/// (substring match, so "joyful" hits "joy").
pub fn heuristic_sentiment(text: &str) -> Sentiment {
    if text.trim().is_empty() {
        return Sentiment::neutral();
    }

    let lower = text.to_lowercase();
    let pos_hits = count_hits(&lower, POSITIVE_KEYWORDS);
    let neg_hits = count_hits(&lower, NEGATIVE_KEYWORDS);

    if pos_hits > neg_hits {
        Sentiment::new(Emotion::Positive, score_for(pos_hits - neg_hits))
    } else if neg_hits > pos_hits {
        Sentiment::new(Emotion::Negative, score_for(neg_hits - pos_hits))
    } else {
        Sentiment::new(Emotion::Neutral, NEUTRAL_SCORE)
    }
}

fn count_hits(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

fn score_for(diff: usize) -> f64 {
    (BASE_SCORE + STEP_PER_HIT * diff as f64).min(1.0)
}
