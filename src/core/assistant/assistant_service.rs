use super::formatting::ensure_code_block;
use super::models::{AiConfig, AiMessage, AiProviderResponse};
use super::prompts::{correction_prompt, explanation_prompt, EMPTY_CORRECTION, EMPTY_EXPLANATION};
use async_trait::async_trait;
use std::error::Error;

const EXPLAIN_TEMPERATURE: f32 = 0.7;
const EXPLAIN_MAX_TOKENS: u32 = 800;
const CORRECT_TEMPERATURE: f32 = 0.3;
const CORRECT_MAX_TOKENS: u32 = 1000;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request to the AI provider.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<AiProviderResponse, Box<dyn Error + Send + Sync>>;
}

// Blanket implementation for Box<dyn AiProvider>, so the provider can be
// chosen at runtime.
#[async_trait]
impl AiProvider for Box<dyn AiProvider> {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<AiProviderResponse, Box<dyn Error + Send + Sync>> {
        (**self).chat_complete(messages, config).await
    }
}

/// The upstream completion call failed.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to generate explanation: {0}")]
    Explanation(String),

    #[error("Failed to generate code correction: {0}")]
    Correction(String),
}

/// What the router needs from a text generator.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Prose explanation of a programming concept.
    async fn explain(&self, concept: &str) -> Result<String, GenerationError>;

    /// Corrected code plus a short explanation. The result always contains a
    /// fenced code block.
    async fn correct(&self, code: &str, language: &str) -> Result<String, GenerationError>;
}

pub struct AssistantService<P: AiProvider> {
    provider: P,
    model: String,
}

impl<P: AiProvider> AssistantService<P> {
    pub fn new(provider: P, model: String) -> Self {
        Self { provider, model }
    }

    fn config(&self, temperature: f32, max_tokens: u32) -> AiConfig {
        AiConfig {
            model: self.model.clone(),
            temperature,
            max_tokens: Some(max_tokens),
        }
    }
}

#[async_trait]
impl<P: AiProvider> ResponseGenerator for AssistantService<P> {
    async fn explain(&self, concept: &str) -> Result<String, GenerationError> {
        let messages = [AiMessage::user(explanation_prompt(concept))];
        let config = self.config(EXPLAIN_TEMPERATURE, EXPLAIN_MAX_TOKENS);

        let response = self
            .provider
            .chat_complete(&messages, &config)
            .await
            .map_err(|e| GenerationError::Explanation(e.to_string()))?;

        Ok(response
            .content
            .filter(|content| !content.trim().is_empty())
            .unwrap_or_else(|| EMPTY_EXPLANATION.to_string()))
    }

    async fn correct(&self, code: &str, language: &str) -> Result<String, GenerationError> {
        let messages = [AiMessage::user(correction_prompt(code, language))];
        let config = self.config(CORRECT_TEMPERATURE, CORRECT_MAX_TOKENS);

        let response = self
            .provider
            .chat_complete(&messages, &config)
            .await
            .map_err(|e| GenerationError::Correction(e.to_string()))?;

        let content = response
            .content
            .filter(|content| !content.trim().is_empty())
            .unwrap_or_else(|| EMPTY_CORRECTION.to_string());

        Ok(ensure_code_block(&content, language))
    }
}
