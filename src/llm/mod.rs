//! OpenAI-compatible chat completion client
//!
//! Only used when an API key is configured. Every failure is reported as an
//! error so the reply composer can fall back to the knowledge base.

pub mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::config::LlmConfig;
use crate::kb::Language;
use crate::KhetGuruError;
use crate::Result;

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String, // "user" or "assistant"
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    history_turns: usize,
}

impl LlmService {
    /// Create a client; the config must carry an API key
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| KhetGuruError::ConfigError("LLM API key not provided".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KhetGuruError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            history_turns: config.history_turns,
        })
    }

    /// Client for the application config, `None` when no key is configured
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>> {
        if !config.llm_enabled() {
            info!("No LLM API key configured, chat replies come from the knowledge base");
            return Ok(None);
        }
        let service = Self::new(&config.llm)?;
        info!("LLM replies enabled with model {}", service.model);
        Ok(Some(service))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Messages sent to the model: system prompt, recent history, the new message
    pub fn build_messages(
        &self,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> Vec<ChatMessage> {
        let skip = history.len().saturating_sub(self.history_turns);
        let mut messages = Vec::with_capacity(history.len() - skip + 2);
        messages.push(ChatMessage::new("system", prompts::system_prompt(language)));
        messages.extend(history.iter().skip(skip).cloned());
        messages.push(ChatMessage::new("user", message));
        messages
    }

    /// Ask the model for a reply
    ///
    /// # Errors
    /// - network failures and timeouts
    /// - non-success HTTP status
    /// - responses without a non-empty message
    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct CompletionRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = CompletionRequest {
            model: &self.model,
            messages: self.build_messages(message, history, language),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| KhetGuruError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(KhetGuruError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| KhetGuruError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| KhetGuruError::LlmError("No message in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(history_turns: usize) -> LlmService {
        LlmService::new(&LlmConfig {
            api_key: Some("sk-test".to_string()),
            history_turns,
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_key() {
        let err = LlmService::new(&LlmConfig::default()).unwrap_err();
        assert!(matches!(err, KhetGuruError::ConfigError(_)));
    }

    #[test]
    fn test_build_messages_keeps_recent_history() {
        let history: Vec<ChatMessage> = (0..10)
            .map(|i| ChatMessage::new("user", format!("turn {i}")))
            .collect();

        let messages = service(8).build_messages("what about wheat?", &history, Language::English);
        assert_eq!(messages.len(), 10);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "turn 2");
        assert_eq!(messages[9], ChatMessage::new("user", "what about wheat?"));
    }

    #[test]
    fn test_build_messages_short_history() {
        let history = vec![ChatMessage::new("assistant", "नमस्ते")];
        let messages = service(8).build_messages("गेहूं", &history, Language::Hindi);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].content.contains("Hindi"));
    }

    #[tokio::test]
    async fn test_chat_unreachable_endpoint_is_error() {
        let service = LlmService::new(&LlmConfig {
            api_key: Some("sk-test".to_string()),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..LlmConfig::default()
        })
        .unwrap();

        let result = service.chat("hello", &[], Language::English).await;
        assert!(result.is_err());
    }
}
