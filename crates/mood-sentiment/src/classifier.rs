use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::Sentiment;
use crate::heuristic::heuristic_sentiment;
use crate::response::InferenceResponse;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference API returned {0}")]
    Status(StatusCode),

    #[error("malformed inference response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("inference response carried no candidates")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    Remote,
    Heuristic,
}

impl ClassifierMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Heuristic => "heuristic",
        }
    }
}

struct RemoteModel {
    client: Client,
    endpoint: String,
    token: String,
}

/// Scores text with the hosted model when a token is configured and falls
/// back to the keyword heuristic on any failure.
pub struct SentimentClassifier {
    remote: Option<RemoteModel>,
}

impl SentimentClassifier {
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let token = config
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            return Ok(Self::heuristic_only());
        };

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            remote: Some(RemoteModel {
                client,
                endpoint: config.endpoint,
                token,
            }),
        })
    }

    pub fn heuristic_only() -> Self {
        Self { remote: None }
    }

    pub fn mode(&self) -> ClassifierMode {
        if self.remote.is_some() {
            ClassifierMode::Remote
        } else {
            ClassifierMode::Heuristic
        }
    }

    pub async fn classify(&self, text: &str) -> Sentiment {
        let Some(remote) = &self.remote else {
            return heuristic_sentiment(text);
        };

        if text.trim().is_empty() {
            return heuristic_sentiment(text);
        }

        match remote.classify(text).await {
            Ok(sentiment) => {
                debug!(
                    "Remote classification: {} ({:.3})",
                    sentiment.label, sentiment.score
                );
                sentiment
            }
            Err(e) => {
                warn!("Remote classification failed, using heuristic: {}", e);
                heuristic_sentiment(text)
            }
        }
    }
}

impl RemoteModel {
    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClassifierError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: InferenceResponse = serde_json::from_slice(&body)?;

        parsed.best().ok_or(ClassifierError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use mood_types::Emotion;

    const TEXT: &str = "I am so happy and joyful";

    fn remote_config(server: &mockito::ServerGuard) -> ClassifierConfig {
        ClassifierConfig {
            endpoint: format!("{}/models/sentiment", server.url()),
            token: Some("test-token".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn missing_or_blank_token_means_heuristic() {
        let c = SentimentClassifier::new(ClassifierConfig::default()).unwrap();
        assert_eq!(c.mode(), ClassifierMode::Heuristic);

        let c = SentimentClassifier::new(ClassifierConfig {
            token: Some("   ".to_string()),
            ..ClassifierConfig::default()
        })
        .unwrap();
        assert_eq!(c.mode(), ClassifierMode::Heuristic);
    }

    #[tokio::test]
    async fn heuristic_mode_is_deterministic() {
        let c = SentimentClassifier::heuristic_only();
        let s = c.classify(TEXT).await;
        assert_eq!(s.label, Emotion::Positive);
        assert!((s.score - 0.8).abs() < 1e-9);

        let s = c.classify("").await;
        assert_eq!(s.label, Emotion::Neutral);
        assert_eq!(s.score, 0.5);
    }

    #[tokio::test]
    async fn remote_result_is_normalized() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/sentiment")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Json(serde_json::json!({ "inputs": "meh" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[[{"label":"LABEL_2","score":0.91},{"label":"LABEL_0","score":0.04}]]"#)
            .create_async()
            .await;

        let c = SentimentClassifier::new(remote_config(&server)).unwrap();
        assert_eq!(c.mode(), ClassifierMode::Remote);

        let s = c.classify("meh").await;
        mock.assert_async().await;
        assert_eq!(s.label, Emotion::Positive);
        assert_eq!(s.score, 0.91);
        assert_eq!(s.emoji, "😊");
    }

    #[tokio::test]
    async fn non_200_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/sentiment")
            .with_status(503)
            .with_body(r#"{"error":"Model is currently loading"}"#)
            .create_async()
            .await;

        let c = SentimentClassifier::new(remote_config(&server)).unwrap();
        let s = c.classify(TEXT).await;
        mock.assert_async().await;
        assert_eq!(s, heuristic_sentiment(TEXT));
    }

    #[tokio::test]
    async fn malformed_payload_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/sentiment")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let c = SentimentClassifier::new(remote_config(&server)).unwrap();
        let s = c.classify("awful, terrible day").await;
        assert_eq!(s.label, Emotion::Negative);
        assert!((s.score - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_candidates_fall_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/sentiment")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let c = SentimentClassifier::new(remote_config(&server)).unwrap();
        let s = c.classify("Just a regular day").await;
        assert_eq!(s.label, Emotion::Neutral);
        assert_eq!(s.score, 0.5);
    }

    #[tokio::test]
    async fn blank_text_skips_remote() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/sentiment")
            .expect(0)
            .create_async()
            .await;

        let c = SentimentClassifier::new(remote_config(&server)).unwrap();
        let s = c.classify("  ").await;
        mock.assert_async().await;
        assert_eq!(s.label, Emotion::Neutral);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let c = SentimentClassifier::new(ClassifierConfig {
            endpoint: "http://127.0.0.1:1/models/sentiment".to_string(),
            token: Some("test-token".to_string()),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let s = c.classify(TEXT).await;
        assert_eq!(s.label, Emotion::Positive);
    }
}
