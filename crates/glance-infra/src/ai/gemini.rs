//! Gemini `generateContent` client implementing the hashtag and feed-prompt ports.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use glance_core::ports::{AiError, FeedPromptGenerator, HashtagSuggester};

const HASHTAG_PROMPT: &str = "You suggest trending hashtags for user-uploaded media. \
Analyze the attached media and return relevant trending hashtags that increase its discoverability. \
Do not include generic hashtags such as #photo or #video. Each hashtag must be shorter than 30 characters. \
Respond with JSON of the form {\"hashtags\": [\"#example\"]}.";

const FEED_PROMPT: &str = "You curate a personalized feed of \"Glances\" for a new user based on their stated interests. \
Glances are short, engaging social media posts of at most 280 characters. \
Make the list diverse even if the interests are narrow, and only use hashtags relevant to the content. \
Respond with JSON of the form {\"glances\": [\"...\"]}.\n\nUser interests: ";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY` and `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: defaults.base_url,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct HashtagOutput {
    hashtags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeedOutput {
    glances: Vec<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Send `parts` and decode the model's JSON answer into `T`.
    async fn generate_json<T: DeserializeOwned>(&self, parts: Vec<Value>) -> Result<T, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::NotConfigured)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        tracing::debug!(model = %self.config.model, "Calling Gemini");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(%status, "Gemini request failed");
            return Err(classify_failure(&text, status.as_u16()));
        }

        decode_answer(&text)
    }
}

#[async_trait]
impl HashtagSuggester for GeminiClient {
    async fn suggest(&self, media_data_uri: &str) -> Result<Vec<String>, AiError> {
        let (mime, data) = split_data_uri(media_data_uri)
            .ok_or_else(|| AiError::Request("media must be a base64 data URI".to_string()))?;
        let parts = vec![
            json!({ "text": HASHTAG_PROMPT }),
            json!({ "inlineData": { "mimeType": mime, "data": data } }),
        ];

        let output: HashtagOutput = self.generate_json(parts).await?;
        Ok(output.hashtags)
    }
}

#[async_trait]
impl FeedPromptGenerator for GeminiClient {
    async fn generate(&self, interests: &str) -> Result<Vec<String>, AiError> {
        let parts = vec![json!({ "text": format!("{FEED_PROMPT}{interests}") })];

        let output: FeedOutput = self.generate_json(parts).await?;
        Ok(output.glances)
    }
}

/// `data:<mime>;base64,<payload>` into `(mime, payload)`.
fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    Some((mime, data))
}

fn classify_failure(body: &str, status: u16) -> AiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("status {status}"));

    if message.to_ascii_lowercase().contains("billing") {
        AiError::BillingRequired
    } else {
        AiError::Request(message)
    }
}

/// The answer text of the first candidate, parsed as JSON.
fn decode_answer<T: DeserializeOwned>(body: &str) -> Result<T, AiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
    let text = value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| AiError::InvalidResponse("no candidate text".to_string()))?;

    serde_json::from_str(text).map_err(|e| AiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_uri() {
        assert_eq!(
            split_data_uri("data:image/png;base64,AAEC"),
            Some(("image/png", "AAEC"))
        );
        assert_eq!(split_data_uri("https://example.com/a.png"), None);
        assert_eq!(split_data_uri("data:image/png,plain"), None);
    }

    #[test]
    fn test_decode_hashtag_answer() {
        let body = r##"{"candidates":[{"content":{"parts":[{"text":"{\"hashtags\":[\"#sunset\",\"#beach\"]}"}]}}]}"##;
        let output: HashtagOutput = decode_answer(body).unwrap();
        assert_eq!(output.hashtags, vec!["#sunset", "#beach"]);
    }

    #[test]
    fn test_missing_candidate_is_invalid() {
        let result: Result<FeedOutput, _> = decode_answer(r#"{"candidates":[]}"#);
        assert!(matches!(result, Err(AiError::InvalidResponse(_))));
    }

    #[test]
    fn test_billing_failure_detected() {
        let body = r#"{"error":{"code":403,"message":"Billing account not enabled for this project"}}"#;
        assert!(matches!(classify_failure(body, 403), AiError::BillingRequired));
    }

    #[test]
    fn test_other_failure_keeps_message() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted"}}"#;
        assert!(matches!(classify_failure(body, 429), AiError::Request(m) if m == "Resource exhausted"));
        assert!(matches!(classify_failure("oops", 502), AiError::Request(m) if m == "status 502"));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = GeminiClient::new(GeminiConfig::default());
        let result = FeedPromptGenerator::generate(&client, "hiking and coffee").await;
        assert!(matches!(result, Err(AiError::NotConfigured)));
    }
}
