//! Generative-AI collaborator ports.

use async_trait::async_trait;

/// Suggests trending hashtags for an image.
#[async_trait]
pub trait HashtagSuggester: Send + Sync {
    /// `media_data_uri` is `data:<mime>;base64,<payload>`.
    async fn suggest(&self, media_data_uri: &str) -> Result<Vec<String>, AiError>;
}

/// Generates onboarding glance texts from a description of interests.
#[async_trait]
pub trait FeedPromptGenerator: Send + Sync {
    async fn generate(&self, interests: &str) -> Result<Vec<String>, AiError>;
}

/// AI collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI suggestions require billing to be enabled on the AI project")]
    BillingRequired,

    #[error("AI service is not configured")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI returned an unexpected response: {0}")]
    InvalidResponse(String),
}
