//! Label model client
//!
//! Sends reconstructed label text to a chat-completions endpoint and returns
//! the model's free-form reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompt::EXTRACTION_PROMPT;
use crate::config::{ApiKey, Config};

/// Model call error types
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("No model API key configured")]
    NotConfigured,

    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model reply contained no choices")]
    EmptyReply,
}

/// Producer of nutrition replies for a block of label text
#[async_trait]
pub trait NutritionModel: Send + Sync {
    /// Short name for status output
    fn name(&self) -> &str;

    /// Ask for the eight canonical values, one per line
    async fn extract_values(&self, label_text: &str) -> Result<String, ModelError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions model
pub struct OpenAiModel {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiModel {
    pub fn new(api_key: ApiKey, base_url: impl Into<String>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            model: model.into(),
            max_tokens,
        }
    }

    /// Build from configuration; `None` when no key is set
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .api_key
            .clone()
            .map(|key| Self::new(key, config.api_url.clone(), config.model.clone(), config.max_tokens))
    }
}

#[async_trait]
impl NutritionModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn extract_values(&self, label_text: &str) -> Result<String, ModelError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: label_text,
                },
            ],
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, chars = label_text.len(), "Sending label text to model");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ModelError::EmptyReply)
    }
}

/// Stand-in used when no API key is configured
pub struct UnconfiguredModel;

#[async_trait]
impl NutritionModel for UnconfiguredModel {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn extract_values(&self, _label_text: &str) -> Result<String, ModelError> {
        Err(ModelError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![
                ChatMessage { role: "system", content: EXTRACTION_PROMPT },
                ChatMessage { role: "user", content: "Calories 120" },
            ],
            max_tokens: 200,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 200);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Calories 120");
    }

    #[test]
    fn test_chat_response_parse() {
        let raw = r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "30\n120"}}]}"#;
        let chat: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(chat.choices[0].message.content.as_deref(), Some("30\n120"));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(OpenAiModel::from_config(&config).is_none());

        let config = Config::from_lookup(|name| {
            (name == crate::config::ENV_API_KEY).then(|| "sk-test".to_string())
        })
        .unwrap();
        let model = OpenAiModel::from_config(&config).unwrap();
        assert_eq!(model.name(), crate::config::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_unconfigured_model_errors() {
        let err = UnconfiguredModel.extract_values("Calories 120").await.unwrap_err();
        assert!(matches!(err, ModelError::NotConfigured));
    }
}
