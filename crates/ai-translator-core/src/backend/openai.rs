use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::http::{check_status, non_empty, send_error};
use super::traits::{BackendInfo, GenerateRequest, Generator};
use crate::error::{Error, Result};
use crate::provider::ProviderId;

/// OpenAI-compatible chat completions backend.
/// Serves both OpenAI and Groq, which expose the same API.
pub struct OpenAiBackend {
    client: Client,
    provider: ProviderId,
    /// Base URL for the API (e.g., "https://api.openai.com/v1")
    pub api_base: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiBackend {
    pub fn new(
        client: Client,
        provider: ProviderId,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            provider,
            api_base: api_base.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Generator for OpenAiBackend {
    fn info(&self) -> BackendInfo {
        BackendInfo {
            provider: self.provider,
            protocol: "openai-chat-completions",
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        debug!("{} chat completion request to {}", self.provider, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(self.provider, &e, self.timeout))?;

        let chat: ChatResponse = check_status(self.provider, response)
            .await?
            .json()
            .await
            .map_err(|e| Error::BackendInvalidResponse {
                provider: self.provider,
                reason: e.to_string(),
            })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::BackendInvalidResponse {
                provider: self.provider,
                reason: "No choices in response".to_string(),
            })?;

        non_empty(self.provider, &content)
    }
}
