use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::http::{check_status, non_empty, send_error};
use super::traits::{BackendInfo, GenerateRequest, Generator};
use crate::error::{Error, Result};
use crate::provider::ProviderId;

/// Google Gemini `generateContent` backend
pub struct GeminiBackend {
    client: Client,
    pub api_base: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiBackend {
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
impl Generator for GeminiBackend {
    fn info(&self) -> BackendInfo {
        BackendInfo {
            provider: ProviderId::Google,
            protocol: "gemini-generate-content",
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let provider = ProviderId::Google;
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            request.model
        );
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &request.system,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        debug!("gemini generateContent request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(provider, &e, self.timeout))?;

        let generated: GenerateContentResponse = check_status(provider, response)
            .await?
            .json()
            .await
            .map_err(|e| Error::BackendInvalidResponse {
                provider,
                reason: e.to_string(),
            })?;

        // Blocked prompts come back with no candidates or no content
        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .ok_or_else(|| Error::BackendInvalidResponse {
                provider,
                reason: "No candidates in response".to_string(),
            })?;

        non_empty(provider, &text)
    }
}
