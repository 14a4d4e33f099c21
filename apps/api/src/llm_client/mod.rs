//! LLM Client — the single point of entry for all language-model calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to Ollama directly.
//! All LLM interactions MUST go through `LlmClient`.
//!
//! The backend is chosen once at startup: `OllamaClient` when enabled,
//! `UnavailableClient` otherwise. Callers never check which one they got;
//! they handle `Result<_, LlmError>` the same way in both cases.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Language model client not initialized")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One turn of a chat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Capability interface over a chat-style language-model service.
/// Every method may fail at any time; failures mean "service unavailable".
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short backend name for logs and status reporting.
    fn backend(&self) -> &'static str;

    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LlmError>;

    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}

/// The LLM client shared by all services. Pins the model name so callers
/// only supply prompts.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn LanguageModel>,
    model: String,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn LanguageModel>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Selects the backend from configuration.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let backend: Arc<dyn LanguageModel> = if config.ollama_enabled {
            Arc::new(OllamaClient::new(
                config.ollama_host.clone(),
                Duration::from_secs(config.ollama_timeout_secs),
            )?)
        } else {
            Arc::new(UnavailableClient)
        };
        Ok(Self::new(backend, config.ollama_model.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend()
    }

    /// Single-turn exchange: one system message, one user message.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
        let text = self.backend.chat(&self.model, &messages).await?;
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }

    /// Calls the LLM and deserializes the reply as JSON.
    /// Tolerates replies that wrap the JSON in markdown code fences.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, system).await?;
        serde_json::from_str(extract_json_block(&text)).map_err(LlmError::Parse)
    }

    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        self.backend.list_models().await
    }
}

/// Pulls the payload out of an LLM reply.
///
/// Prefers the first ```json fence pair, then the first plain ``` fence pair,
/// then the whole reply. An unterminated fence yields everything after it.
pub fn extract_json_block(text: &str) -> &str {
    const JSON_FENCE: &str = "```json";
    const FENCE: &str = "```";

    let start = if let Some(idx) = text.find(JSON_FENCE) {
        idx + JSON_FENCE.len()
    } else if let Some(idx) = text.find(FENCE) {
        idx + FENCE.len()
    } else {
        return text.trim();
    };

    let rest = &text[start..];
    match rest.find(FENCE) {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Talks to a local Ollama server over its REST API.
/// Every request is bounded by the configured timeout; no retries.
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OllamaError>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    fn backend(&self) -> &'static str {
        "ollama"
    }

    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request_body = OllamaChatRequest {
            model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let parsed: OllamaChatResponse = serde_json::from_str(&body)?;

        debug!(
            "Ollama chat succeeded: model={}, reply_chars={}",
            model,
            parsed.message.content.len()
        );
        Ok(parsed.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let tags: OllamaTags = serde_json::from_str(&response.text().await?)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Null backend
// ────────────────────────────────────────────────────────────────────────────

/// Stand-in used when no language model is configured. Fails every call.
pub struct UnavailableClient;

#[async_trait]
impl LanguageModel for UnavailableClient {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn chat(&self, _model: &str, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        Err(LlmError::Unavailable)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        Err(LlmError::Unavailable)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{client, ScriptedModel};
    use super::*;

    #[test]
    fn test_chat_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_ollama_chat_response_deserializes() {
        let body = r#"{"model":"llama3","message":{"role":"assistant","content":"Great answer"},"done":true}"#;
        let parsed: OllamaChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message.content, "Great answer");
    }

    #[test]
    fn test_ollama_tags_deserializes_names() {
        let body = r#"{"models":[{"name":"llama3:latest","size":1},{"name":"mistral:7b"}]}"#;
        let tags: OllamaTags = serde_json::from_str(body).unwrap();
        let names: Vec<_> = tags.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["llama3:latest", "mistral:7b"]);
    }

    #[test]
    fn test_extract_json_block_with_json_tag() {
        let input = "Here you go:\n```json\n{\"key\": \"value\"}\n```\nThanks";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_prefers_json_fence() {
        let input = "```\nnot this\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_block(input), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_block_no_fences() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_unterminated_fence() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(extract_json_block(input), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_call_json_parses_fenced_reply() {
        let (llm, _) = client(ScriptedModel::replying("```json\n{\"n\": 3}\n```"));
        let value: serde_json::Value = llm.call_json("p", "s").await.unwrap();
        assert_eq!(value["n"], 3);
    }

    #[tokio::test]
    async fn test_call_json_rejects_prose() {
        let (llm, _) = client(ScriptedModel::replying("I could not parse that resume."));
        let result: Result<serde_json::Value, _> = llm.call_json("p", "s").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unavailable_client_always_fails() {
        let llm = LlmClient::new(Arc::new(UnavailableClient), "llama3");
        assert!(matches!(llm.call("p", "s").await, Err(LlmError::Unavailable)));
        assert!(matches!(llm.list_models().await, Err(LlmError::Unavailable)));
        assert_eq!(llm.backend_name(), "unavailable");
    }

    #[tokio::test]
    async fn test_call_sends_system_then_user() {
        let (llm, model) = client(ScriptedModel::replying("ok"));
        let reply = llm.call("the prompt", "the system").await.unwrap();
        assert_eq!(reply, "ok");

        let calls = model.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![ChatMessage::system("the system"), ChatMessage::user("the prompt")]
        );
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_content() {
        let (llm, _) = client(ScriptedModel::replying("   \n"));
        assert!(matches!(llm.call("p", "s").await, Err(LlmError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_disabled_config_selects_unavailable_backend() {
        let config = Config {
            ollama_enabled: false,
            ..Config::default()
        };
        let llm = LlmClient::from_config(&config).unwrap();
        assert_eq!(llm.backend_name(), "unavailable");
        assert_eq!(llm.model(), "llama3");
    }
}
