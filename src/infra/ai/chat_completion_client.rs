use crate::core::assistant::{AiConfig, AiMessage, AiProvider, AiProviderResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

/// Pull the first choice's text out of a completion body.
///
/// A missing or null `content` is not an error; the caller substitutes its
/// own fallback text.
fn parse_completion(body: &Value) -> Result<AiProviderResponse, Box<dyn Error + Send + Sync>> {
    let choice = body["choices"]
        .get(0)
        .ok_or("Completion response has no choices")?;

    Ok(AiProviderResponse {
        content: choice["message"]["content"].as_str().map(str::to_string),
    })
}

#[async_trait]
impl AiProvider for ChatCompletionClient {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<AiProviderResponse, Box<dyn Error + Send + Sync>> {
        let payload = json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("Chat completion API error: {} - {}", status, text).into());
        }

        let body: Value = response.json().await?;
        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Hello" } },
                { "message": { "role": "assistant", "content": "Ignored" } }
            ]
        });
        let response = parse_completion(&body).unwrap();
        assert_eq!(response.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn null_content_is_empty_not_error() {
        let body = json!({ "choices": [ { "message": { "content": null } } ] });
        assert!(parse_completion(&body).unwrap().content.is_none());
    }

    #[test]
    fn missing_choices_is_an_error() {
        assert!(parse_completion(&json!({ "error": "quota" })).is_err());
        assert!(parse_completion(&json!({ "choices": [] })).is_err());
    }
}
