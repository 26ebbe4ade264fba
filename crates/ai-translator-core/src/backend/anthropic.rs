use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::http::{check_status, non_empty, send_error};
use super::traits::{BackendInfo, GenerateRequest, Generator};
use crate::error::{Error, Result};
use crate::provider::ProviderId;

/// Messages API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API backend
pub struct AnthropicBackend {
    client: Client,
    pub api_base: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicBackend {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Generator for AnthropicBackend {
    fn info(&self) -> BackendInfo {
        BackendInfo {
            provider: ProviderId::Anthropic,
            protocol: "anthropic-messages",
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let provider = ProviderId::Anthropic;
        let url = format!("{}/messages", self.api_base.trim_end_matches('/'));
        let body = MessagesRequest {
            model: &request.model,
            system: &request.system,
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
            messages: [UserMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!("anthropic messages request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(provider, &e, self.timeout))?;

        let message: MessagesResponse = check_status(provider, response)
            .await?
            .json()
            .await
            .map_err(|e| Error::BackendInvalidResponse {
                provider,
                reason: e.to_string(),
            })?;

        let text: String = message
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        non_empty(provider, &text)
    }
}
