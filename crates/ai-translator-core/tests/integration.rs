//! Integration tests for ai-translator-core
//!
//! These tests drive the dispatcher end to end with in-process backends:
//! - Provider selection against fabricated availability
//! - Fallback order and labelling
//! - Per-attempt timeouts
//! - Demo mode output

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_translator_core::{
    Backends, DispatchConfig, Dispatcher, Error, GenerateRequest, Generator, MOCK_FALLBACK_LABEL,
    Outcome, ProviderDescriptor, ProviderId, ProviderRegistry, Result, TranslationRequest,
    backend::BackendInfo,
};
use async_trait::async_trait;

// =============================================================================
// Scripted Backend for Testing
// =============================================================================

#[derive(Clone, Copy)]
enum Behaviour {
    Reply,
    Fail,
    Hang,
}

/// A backend that answers, fails, or never returns, and records every call.
struct ScriptedBackend {
    provider: ProviderId,
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<(ProviderId, GenerateRequest)>>>,
}

#[async_trait]
impl Generator for ScriptedBackend {
    fn info(&self) -> BackendInfo {
        BackendInfo {
            provider: self.provider,
            protocol: "scripted",
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push((self.provider, request.clone()));

        match self.behaviour {
            Behaviour::Reply => Ok(format!("[{}] translated", self.provider)),
            Behaviour::Fail => Err(Error::BackendRequest {
                provider: self.provider,
                reason: "scripted failure".to_string(),
            }),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

struct Harness {
    dispatcher: Dispatcher,
    calls: Vec<(ProviderId, Arc<AtomicUsize>)>,
    log: Arc<Mutex<Vec<(ProviderId, GenerateRequest)>>>,
}

impl Harness {
    /// Providers listed in `setup` are available with the given behaviour;
    /// the rest of the table is unavailable.
    fn new(setup: &[(ProviderId, Behaviour)]) -> Self {
        Self::with_settings(setup, DispatchConfig::default())
    }

    fn with_settings(setup: &[(ProviderId, Behaviour)], settings: DispatchConfig) -> Self {
        let registry = ProviderRegistry::from_descriptors(ProviderId::ALL.into_iter().map(|id| {
            let available = setup.iter().any(|(p, _)| *p == id);
            ProviderDescriptor::new(id, id.default_model(), available)
        }));

        let log = Arc::new(Mutex::new(Vec::new()));
        let mut backends = Backends::new();
        let mut calls = Vec::new();
        for &(provider, behaviour) in setup {
            let counter = Arc::new(AtomicUsize::new(0));
            calls.push((provider, Arc::clone(&counter)));
            backends.insert(
                provider,
                Arc::new(ScriptedBackend {
                    provider,
                    behaviour,
                    calls: counter,
                    log: Arc::clone(&log),
                }),
            );
        }

        Self {
            dispatcher: Dispatcher::new(registry, backends, settings),
            calls,
            log,
        }
    }

    fn calls_to(&self, provider: ProviderId) -> usize {
        self.calls
            .iter()
            .find(|(p, _)| *p == provider)
            .map_or(0, |(_, c)| c.load(Ordering::SeqCst))
    }

    fn attempt_order(&self) -> Vec<ProviderId> {
        self.log.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }
}

fn request(provider: Option<ProviderId>) -> TranslationRequest {
    TranslationRequest::new("Good morning, team", "en", "fr").with_provider(provider)
}

// =============================================================================
// Selection Tests
// =============================================================================

#[tokio::test]
async fn test_requested_provider_is_used() {
    let h = Harness::new(&[
        (ProviderId::Google, Behaviour::Reply),
        (ProviderId::Anthropic, Behaviour::Reply),
    ]);

    let result = h
        .dispatcher
        .translate(&request(Some(ProviderId::Anthropic)))
        .await
        .unwrap();

    assert_eq!(result.provider, ProviderId::Anthropic);
    assert_eq!(result.provider_name, "Anthropic Claude");
    assert_eq!(result.model_id, "claude-3-haiku-20240307");
    assert_eq!(result.translated_text, "[anthropic] translated");
    assert_eq!(result.outcome, Outcome::Direct);
    assert_eq!(h.calls_to(ProviderId::Google), 0);
}

#[tokio::test]
async fn test_unavailable_request_goes_to_google_not_mock() {
    let h = Harness::new(&[(ProviderId::Google, Behaviour::Reply)]);

    let result = h
        .dispatcher
        .translate(&request(Some(ProviderId::OpenAi)))
        .await
        .unwrap();

    assert_eq!(result.provider, ProviderId::Google);
    assert_eq!(result.provider_name, "Google Gemini");
    assert_eq!(result.outcome, Outcome::Direct);
}

#[tokio::test]
async fn test_unavailable_providers_never_selected() {
    let h = Harness::new(&[(ProviderId::Groq, Behaviour::Reply)]);

    for requested in ProviderId::ALL.into_iter().map(Some).chain([None]) {
        let selected = h.dispatcher.select_provider(requested);
        assert!(
            h.dispatcher.registry().is_available(selected),
            "{requested:?} resolved to unavailable {selected}"
        );
    }
}

#[tokio::test]
async fn test_only_mock_available_is_direct() {
    let h = Harness::new(&[]);

    let result = h
        .dispatcher
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap();

    assert_eq!(result.translated_text, "hola");
    assert_eq!(result.provider_name, "Demo Mode");
    assert_eq!(result.provider, ProviderId::Mock);
    assert_eq!(result.outcome, Outcome::Direct);
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[tokio::test]
async fn test_failed_request_retries_other_provider() {
    let h = Harness::new(&[
        (ProviderId::OpenAi, Behaviour::Fail),
        (ProviderId::Groq, Behaviour::Reply),
    ]);

    let result = h
        .dispatcher
        .translate(&request(Some(ProviderId::OpenAi)))
        .await
        .unwrap();

    assert_eq!(result.provider, ProviderId::Groq);
    assert_eq!(result.provider_name, "Groq Llama");
    assert_eq!(result.model_id, "llama-3.1-8b-instant");
    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(h.attempt_order(), vec![ProviderId::OpenAi, ProviderId::Groq]);
}

#[tokio::test]
async fn test_fallback_prefers_google() {
    let h = Harness::new(&[
        (ProviderId::Google, Behaviour::Reply),
        (ProviderId::OpenAi, Behaviour::Reply),
        (ProviderId::Anthropic, Behaviour::Fail),
    ]);

    let result = h
        .dispatcher
        .translate(&request(Some(ProviderId::Anthropic)))
        .await
        .unwrap();

    assert_eq!(result.provider, ProviderId::Google);
    assert_eq!(h.calls_to(ProviderId::OpenAi), 0);
}

#[tokio::test]
async fn test_all_fail_returns_labelled_mock() {
    let h = Harness::new(&[
        (ProviderId::Google, Behaviour::Fail),
        (ProviderId::OpenAi, Behaviour::Fail),
        (ProviderId::Anthropic, Behaviour::Fail),
        (ProviderId::Groq, Behaviour::Fail),
    ]);

    let result = h
        .dispatcher
        .translate(&TranslationRequest::new("Thank you", "en", "ja"))
        .await
        .unwrap();

    assert_eq!(result.provider_name, MOCK_FALLBACK_LABEL);
    assert_eq!(result.provider, ProviderId::Mock);
    assert_eq!(result.model_id, "mock-translator");
    assert_eq!(result.translated_text, "ありがとう");
    assert_eq!(result.outcome, Outcome::Fallback);
}

#[tokio::test]
async fn test_each_provider_tried_once() {
    let h = Harness::new(&[
        (ProviderId::Google, Behaviour::Fail),
        (ProviderId::OpenAi, Behaviour::Fail),
        (ProviderId::Anthropic, Behaviour::Fail),
        (ProviderId::Groq, Behaviour::Fail),
    ]);

    h.dispatcher
        .translate(&request(Some(ProviderId::Groq)))
        .await
        .unwrap();

    assert_eq!(
        h.attempt_order(),
        vec![
            ProviderId::Groq,
            ProviderId::Google,
            ProviderId::OpenAi,
            ProviderId::Anthropic
        ]
    );
    for id in [
        ProviderId::Google,
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Groq,
    ] {
        assert_eq!(h.calls_to(id), 1, "{id} called more than once");
    }
}

#[tokio::test(start_paused = true)]
async fn test_hanging_backend_times_out_and_falls_back() {
    let settings = DispatchConfig {
        attempt_timeout_secs: 3,
        ..Default::default()
    };
    let h = Harness::with_settings(
        &[
            (ProviderId::Google, Behaviour::Hang),
            (ProviderId::Groq, Behaviour::Reply),
        ],
        settings,
    );

    let result = h.dispatcher.translate(&request(None)).await.unwrap();

    assert_eq!(result.provider, ProviderId::Groq);
    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(h.calls_to(ProviderId::Google), 1);
}

#[tokio::test(start_paused = true)]
async fn test_mock_latency_applied() {
    let settings = DispatchConfig {
        mock_latency_ms: 800,
        ..Default::default()
    };
    let h = Harness::with_settings(&[], settings);

    let started = tokio::time::Instant::now();
    h.dispatcher
        .translate(&TranslationRequest::new("hi", "en", "de"))
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(800));
}

// =============================================================================
// Request Shape Tests
// =============================================================================

#[tokio::test]
async fn test_generate_request_uses_uniform_settings() {
    let h = Harness::new(&[
        (ProviderId::Anthropic, Behaviour::Fail),
        (ProviderId::OpenAi, Behaviour::Reply),
    ]);

    h.dispatcher
        .translate(
            &TranslationRequest::new("Bonjour", "fr", "xx")
                .with_provider(Some(ProviderId::Anthropic)),
        )
        .await
        .unwrap();

    let log = h.log.lock().unwrap();
    assert_eq!(log.len(), 2);
    for (_, req) in log.iter() {
        assert_eq!(req.max_output_tokens, 2000);
        assert_eq!(req.temperature, Some(0.3));
        assert!(req.system.contains("from French to xx"));
        assert!(req.prompt.ends_with("\n\nBonjour"));
    }
    assert_eq!(log[0].1.model, "claude-3-haiku-20240307");
    assert_eq!(log[1].1.model, "gpt-4o-mini");
}

#[tokio::test]
async fn test_list_available_providers_order() {
    let h = Harness::new(&[
        (ProviderId::Groq, Behaviour::Reply),
        (ProviderId::Google, Behaviour::Reply),
    ]);

    assert_eq!(
        h.dispatcher.list_available_providers(),
        vec![ProviderId::Google, ProviderId::Groq, ProviderId::Mock]
    );
}
