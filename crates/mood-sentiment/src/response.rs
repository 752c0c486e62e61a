use serde::Deserialize;

use crate::labels::normalize_label;
use crate::{NEUTRAL_SCORE, Sentiment};

/// One label/score pair from a hosted classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Shapes returned by text-classification endpoints: either a flat list
/// of candidates or a batch of lists (one per input) where only the first
/// is relevant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Nested(Vec<Vec<Candidate>>),
    Flat(Vec<Candidate>),
}

impl InferenceResponse {
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            Self::Flat(candidates) => candidates,
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }

    /// Normalized sentiment of the highest-scoring candidate, or `None`
    /// when the payload carried no candidates. Ties go to the earliest.
    pub fn best(self) -> Option<Sentiment> {
        let best = self
            .into_candidates()
            .into_iter()
            .reduce(|best, next| {
                if next.score.unwrap_or(0.0) > best.score.unwrap_or(0.0) {
                    next
                } else {
                    best
                }
            })?;

        let label = normalize_label(best.label.as_deref().unwrap_or_default());
        Some(Sentiment::new(label, best.score.unwrap_or(NEUTRAL_SCORE)))
    }
}
