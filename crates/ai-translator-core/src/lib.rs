//! AI Translator Core Library
//!
//! This library provides the core functionality for translating text with
//! hosted language models:
//! - Provider registry with credential-based availability
//! - Backends for Gemini, OpenAI, Anthropic and Groq
//! - Dispatcher with automatic fallback between providers
//! - Offline demo translator used as the final fallback

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mock;
pub mod prompt;
pub mod provider;

pub use backend::{Backends, GenerateRequest, Generator, create_backends};
pub use config::{
    AppConfig, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, DispatchConfig, Lang, LanguageOption,
    flag_for_lang, language_name, languages,
};
pub use dispatch::{
    Dispatcher, MOCK_FALLBACK_LABEL, Outcome, TranslationRequest, TranslationResult,
};
pub use error::{Error, Result};
pub use mock::mock_translate;
pub use provider::{ProviderCredentials, ProviderDescriptor, ProviderId, ProviderRegistry};
