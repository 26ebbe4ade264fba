//! Provider registry.
//!
//! A fixed table of the translation backends this crate knows about. Each
//! entry's availability is decided once, when the registry is built from
//! [`ProviderCredentials`], and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ModelOverrides;

/// Identifier of a known translation backend.
///
/// Declaration order is the registry's table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Google,
    OpenAi,
    Anthropic,
    Groq,
    Mock,
}

impl ProviderId {
    /// Every provider in table order.
    pub const ALL: [Self; 5] = [
        Self::Google,
        Self::OpenAi,
        Self::Anthropic,
        Self::Groq,
        Self::Mock,
    ];

    /// Provider placed first by [`ProviderRegistry::list_available`] when available.
    pub const PREFERRED: Self = Self::Google;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Groq => "groq",
            Self::Mock => "mock",
        }
    }

    /// Parse a provider id. Unknown ids yield `None`, which callers treat
    /// the same as an unavailable provider.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google Gemini",
            Self::OpenAi => "OpenAI GPT-4",
            Self::Anthropic => "Anthropic Claude",
            Self::Groq => "Groq Llama",
            Self::Mock => "Demo Mode",
        }
    }

    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Google => "gemini-1.5-flash",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-haiku-20240307",
            Self::Groq => "llama-3.1-8b-instant",
            Self::Mock => "mock-translator",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Google => "Google's latest AI with superior multilingual expertise",
            Self::OpenAi => "Advanced language model with excellent translation quality",
            Self::Anthropic => "Highly accurate translations with cultural context",
            Self::Groq => "Ultra-fast inference with competitive quality",
            Self::Mock => "Demonstration translations for preview",
        }
    }

    /// Environment variable holding this provider's API key.
    pub const fn credential_env(self) -> Option<&'static str> {
        match self {
            Self::Google => Some("GOOGLE_GENERATIVE_AI_API_KEY"),
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Mock => None,
        }
    }

    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API keys for the hosted backends.
///
/// Built once at startup and handed to the registry and backend factory.
/// Empty values count as missing.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub google: Option<String>,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub groq: Option<String>,
}

impl ProviderCredentials {
    /// Read every provider's key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests, embedded hosts).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |id: ProviderId| {
            id.credential_env()
                .and_then(&lookup)
                .filter(|v| !v.trim().is_empty())
        };

        Self {
            google: read(ProviderId::Google),
            openai: read(ProviderId::OpenAi),
            anthropic: read(ProviderId::Anthropic),
            groq: read(ProviderId::Groq),
        }
    }

    /// Set a key, returning the updated credentials.
    #[must_use]
    pub fn with(mut self, id: ProviderId, key: impl Into<String>) -> Self {
        let key = Some(key.into());
        match id {
            ProviderId::Google => self.google = key,
            ProviderId::OpenAi => self.openai = key,
            ProviderId::Anthropic => self.anthropic = key,
            ProviderId::Groq => self.groq = key,
            ProviderId::Mock => {}
        }
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<&str> {
        match id {
            ProviderId::Google => self.google.as_deref(),
            ProviderId::OpenAi => self.openai.as_deref(),
            ProviderId::Anthropic => self.anthropic.as_deref(),
            ProviderId::Groq => self.groq.as_deref(),
            ProviderId::Mock => None,
        }
        .filter(|v| !v.trim().is_empty())
    }

    pub fn has(&self, id: ProviderId) -> bool {
        id.is_mock() || self.get(id).is_some()
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |id| if self.has(id) { "<set>" } else { "<unset>" };
        f.debug_struct("ProviderCredentials")
            .field("google", &mask(ProviderId::Google))
            .field("openai", &mask(ProviderId::OpenAi))
            .field("anthropic", &mask(ProviderId::Anthropic))
            .field("groq", &mask(ProviderId::Groq))
            .finish()
    }
}

/// Static metadata for one backend plus its availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub display_name: String,
    pub model_id: String,
    pub description: String,
    pub available: bool,
}

impl ProviderDescriptor {
    pub fn new(id: ProviderId, model_id: impl Into<String>, available: bool) -> Self {
        Self {
            id,
            display_name: id.display_name().to_string(),
            model_id: model_id.into(),
            description: id.description().to_string(),
            // Mock is the universal fallback
            available: available || id.is_mock(),
        }
    }
}

/// Read-only table of providers.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build the standard table, marking each hosted provider available
    /// when its key is present.
    pub fn new(credentials: &ProviderCredentials, models: &ModelOverrides) -> Self {
        let providers = ProviderId::ALL
            .into_iter()
            .map(|id| ProviderDescriptor::new(id, models.model_for(id), credentials.has(id)))
            .collect();

        Self { providers }
    }

    /// Build from explicit descriptors, in the given order.
    ///
    /// A mock entry is appended if missing; duplicates keep the first entry.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        let mut providers: Vec<ProviderDescriptor> = Vec::new();
        for descriptor in descriptors {
            if !providers.iter().any(|p| p.id == descriptor.id) {
                providers.push(ProviderDescriptor::new(
                    descriptor.id,
                    descriptor.model_id,
                    descriptor.available,
                ));
            }
        }
        if !providers.iter().any(|p| p.id.is_mock()) {
            providers.push(ProviderDescriptor::new(
                ProviderId::Mock,
                ProviderId::Mock.default_model(),
                true,
            ));
        }

        Self { providers }
    }

    /// Available provider ids: the preferred provider first, mock last,
    /// everything else in table order.
    pub fn list_available(&self) -> Vec<ProviderId> {
        let mut ids: Vec<ProviderId> = self
            .providers
            .iter()
            .filter(|p| p.available)
            .map(|p| p.id)
            .collect();

        // stable: ties keep table order
        ids.sort_by_key(|id| match *id {
            ProviderId::PREFERRED => 0,
            ProviderId::Mock => 2,
            _ => 1,
        });
        ids
    }

    pub fn descriptor(&self, id: ProviderId) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn is_available(&self, id: ProviderId) -> bool {
        self.descriptor(id).is_some_and(|p| p.available)
    }

    /// All descriptors in table order, available or not.
    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    /// Descriptors of available providers in [`Self::list_available`] order.
    pub fn available_descriptors(&self) -> Vec<&ProviderDescriptor> {
        self.list_available()
            .into_iter()
            .filter_map(|id| self.descriptor(id))
            .collect()
    }

    /// The provider a UI should pre-select: the first available hosted
    /// provider, or mock when none is configured.
    pub fn default_selection(&self) -> ProviderId {
        self.list_available()
            .into_iter()
            .find(|id| !id.is_mock())
            .unwrap_or(ProviderId::Mock)
    }
}
