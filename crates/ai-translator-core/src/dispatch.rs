//! Provider selection and fallback.
//!
//! The dispatcher resolves which provider should handle a request, calls its
//! backend, and on failure moves on to the next available hosted provider.
//! When every hosted provider has failed, the demo translator answers, so a
//! well-formed request always produces a translation.

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::backend::{Backends, GenerateRequest, create_backends};
use crate::config::{AppConfig, DispatchConfig, Lang};
use crate::error::{Error, Result};
use crate::mock::mock_translate;
use crate::prompt;
use crate::provider::{ProviderCredentials, ProviderId, ProviderRegistry};

/// Label reported when demo output stands in for failed backends.
pub const MOCK_FALLBACK_LABEL: &str = "Demo Mode (Fallback)";

/// A single translate action.
///
/// Callers reject empty text and identical languages before dispatching.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: Lang,
    pub target_lang: Lang,
    /// Preferred provider; unavailable or absent means "use the default".
    pub requested_provider: Option<ProviderId>,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<Lang>,
        target_lang: impl Into<Lang>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            requested_provider: None,
        }
    }

    #[must_use]
    pub const fn with_provider(mut self, provider: Option<ProviderId>) -> Self {
        self.requested_provider = provider;
        self
    }
}

/// How the returned translation was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The initially selected provider answered (including a direct demo pick)
    Direct,
    /// Another provider answered after the selected one failed
    Fallback,
}

/// Translation plus the provider that actually produced it.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub provider_name: String,
    pub model_id: String,
    pub provider: ProviderId,
    pub outcome: Outcome,
}

/// Selects providers, invokes backends and falls back on failure.
pub struct Dispatcher {
    registry: ProviderRegistry,
    backends: Backends,
    settings: DispatchConfig,
}

impl Dispatcher {
    pub const fn new(
        registry: ProviderRegistry,
        backends: Backends,
        settings: DispatchConfig,
    ) -> Self {
        Self {
            registry,
            backends,
            settings,
        }
    }

    /// Build the registry and HTTP backends from configuration and keys.
    pub fn from_config(config: &AppConfig, credentials: &ProviderCredentials) -> Result<Self> {
        let registry = ProviderRegistry::new(credentials, &config.models);
        let backends = create_backends(config, credentials)?;

        info!(
            "Providers available: {}",
            registry
                .list_available()
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self::new(registry, backends, config.dispatch.clone()))
    }

    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Available providers, preferred first and mock last.
    pub fn list_available_providers(&self) -> Vec<ProviderId> {
        self.registry.list_available()
    }

    /// Resolve the provider that should handle a request.
    ///
    /// An available requested provider wins; otherwise the first entry of
    /// [`ProviderRegistry::list_available`], which is never empty.
    pub fn select_provider(&self, requested: Option<ProviderId>) -> ProviderId {
        if let Some(id) = requested
            && self.registry.is_available(id)
        {
            return id;
        }

        let fallback = self
            .registry
            .list_available()
            .first()
            .copied()
            .unwrap_or(ProviderId::Mock);

        if let Some(id) = requested {
            debug!("Requested provider {} unavailable, using {}", id, fallback);
        }
        fallback
    }

    /// Translate `request`, falling back across providers as needed.
    ///
    /// Backend failures are never returned. The only error is
    /// [`Error::UnsupportedProvider`], raised when an available hosted
    /// provider has no backend registered.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let selected = self.select_provider(request.requested_provider);

        if selected.is_mock() {
            debug!("Demo mode selected");
            return Ok(self.mock_result(request, Outcome::Direct).await);
        }

        let system = prompt::system_instruction(&request.source_lang, &request.target_lang);
        let user = prompt::user_prompt(&request.text, &request.source_lang, &request.target_lang);

        let mut failed: Vec<ProviderId> = Vec::new();
        let mut current = Some(selected);

        // Each failed attempt adds a distinct id to `failed`, so this runs at
        // most once per hosted provider.
        while let Some(provider) = current {
            match self.attempt(provider, &system, &user).await {
                Ok(text) => {
                    let outcome = if provider == selected {
                        Outcome::Direct
                    } else {
                        Outcome::Fallback
                    };
                    return Ok(self.backend_result(provider, text, outcome));
                }
                Err(e @ Error::UnsupportedProvider(_)) => return Err(e),
                Err(e) => {
                    error!("Translation error with {}: {}", provider, e);
                    failed.push(provider);
                }
            }

            current = self
                .registry
                .list_available()
                .into_iter()
                .find(|id| !id.is_mock() && !failed.contains(id));

            if let Some(next) = current {
                info!("Trying fallback provider: {}", next);
            }
        }

        warn!(
            "All providers failed ({}), using demo translation",
            failed
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(self.mock_result(request, Outcome::Fallback).await)
    }

    /// One bounded call to `provider`'s backend.
    async fn attempt(&self, provider: ProviderId, system: &str, user: &str) -> Result<String> {
        let Some(backend) = self.backends.get(&provider) else {
            error!("No backend registered for available provider {}", provider);
            return Err(Error::UnsupportedProvider(provider));
        };

        let request = GenerateRequest {
            model: self.model_id(provider),
            system: system.to_string(),
            prompt: user.to_string(),
            max_output_tokens: self.settings.max_output_tokens,
            temperature: Some(self.settings.temperature),
        };

        let timeout = self.settings.attempt_timeout();
        let started = Instant::now();
        let result = tokio::time::timeout(timeout, backend.generate(&request))
            .await
            .unwrap_or_else(|_| {
                Err(Error::BackendTimeout {
                    provider,
                    seconds: timeout.as_secs(),
                })
            });

        match &result {
            Ok(_) => info!(
                "Translated with {} ({}) in {:?}",
                provider,
                request.model,
                started.elapsed()
            ),
            Err(e) => warn!(
                "Attempt with {} ({}) failed after {:?}: {}",
                provider,
                request.model,
                started.elapsed(),
                e
            ),
        }

        result
    }

    fn model_id(&self, provider: ProviderId) -> String {
        self.registry
            .descriptor(provider)
            .map_or_else(|| provider.default_model().to_string(), |d| d.model_id.clone())
    }

    fn display_name(&self, provider: ProviderId) -> String {
        self.registry
            .descriptor(provider)
            .map_or_else(|| provider.display_name().to_string(), |d| d.display_name.clone())
    }

    fn backend_result(
        &self,
        provider: ProviderId,
        text: String,
        outcome: Outcome,
    ) -> TranslationResult {
        TranslationResult {
            translated_text: text,
            provider_name: self.display_name(provider),
            model_id: self.model_id(provider),
            provider,
            outcome,
        }
    }

    async fn mock_result(
        &self,
        request: &TranslationRequest,
        outcome: Outcome,
    ) -> TranslationResult {
        let latency = self.settings.mock_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let provider_name = match outcome {
            Outcome::Direct => self.display_name(ProviderId::Mock),
            Outcome::Fallback => MOCK_FALLBACK_LABEL.to_string(),
        };

        TranslationResult {
            translated_text: mock_translate(&request.text, request.target_lang.as_str()),
            provider_name,
            model_id: self.model_id(ProviderId::Mock),
            provider: ProviderId::Mock,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderDescriptor;

    fn dispatcher(available: &[ProviderId]) -> Dispatcher {
        let registry = ProviderRegistry::from_descriptors(ProviderId::ALL.into_iter().map(|id| {
            ProviderDescriptor::new(id, id.default_model(), available.contains(&id))
        }));
        Dispatcher::new(registry, Backends::new(), DispatchConfig::default())
    }

    #[test]
    fn test_select_requested_available() {
        let d = dispatcher(&[ProviderId::Google, ProviderId::Groq]);
        assert_eq!(d.select_provider(Some(ProviderId::Groq)), ProviderId::Groq);
    }

    #[test]
    fn test_select_unavailable_request_uses_first_available() {
        let d = dispatcher(&[ProviderId::Google]);
        assert_eq!(d.select_provider(Some(ProviderId::OpenAi)), ProviderId::Google);
    }

    #[test]
    fn test_select_default_prefers_google() {
        let d = dispatcher(&[ProviderId::Anthropic, ProviderId::Google]);
        assert_eq!(d.select_provider(None), ProviderId::Google);
    }

    #[test]
    fn test_select_without_keys_is_mock() {
        let d = dispatcher(&[]);
        assert_eq!(d.select_provider(None), ProviderId::Mock);
        assert_eq!(d.select_provider(Some(ProviderId::Anthropic)), ProviderId::Mock);
    }

    #[test]
    fn test_mock_can_be_requested_explicitly() {
        let d = dispatcher(&[ProviderId::Google]);
        assert_eq!(d.select_provider(Some(ProviderId::Mock)), ProviderId::Mock);
    }

    #[tokio::test]
    async fn test_direct_mock_label() {
        let d = dispatcher(&[]);
        let result = d
            .translate(&TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap();
        assert_eq!(result.translated_text, "hola");
        assert_eq!(result.provider_name, "Demo Mode");
        assert_eq!(result.model_id, "mock-translator");
        assert_eq!(result.outcome, Outcome::Direct);
    }

    #[tokio::test]
    async fn test_missing_backend_fails_loudly() {
        let d = dispatcher(&[ProviderId::Groq]);
        let err = d
            .translate(&TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedProvider(ProviderId::Groq)));
    }
}
