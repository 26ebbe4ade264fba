use config::builder::{ConfigBuilder, DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::provider::ProviderId;

/// Language codes following ISO 639-1
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, or the raw code when unknown.
    pub fn display_name(&self) -> &str {
        language_name(&self.0)
    }
}

// Serde default functions for common languages
fn default_source_lang() -> Lang {
    Lang::new(DEFAULT_SOURCE_LANG)
}

fn default_target_lang() -> Lang {
    Lang::new(DEFAULT_TARGET_LANG)
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Generation limits and timing applied to every backend call.
///
/// The same temperature and timeout are used for every hosted provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Output token ceiling per request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature (low favours literal output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Deadline for a single backend attempt, in seconds
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Artificial delay before returning demo output, in milliseconds
    #[serde(default)]
    pub mock_latency_ms: u64,
}

const fn default_max_output_tokens() -> u32 {
    2000
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_attempt_timeout_secs() -> u64 {
    15
}

impl DispatchConfig {
    pub const fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub const fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            mock_latency_ms: 0,
        }
    }
}

/// Per-provider model id overrides. Unset entries use the built-in model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelOverrides {
    pub google: Option<String>,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub groq: Option<String>,
}

impl ModelOverrides {
    pub fn model_for(&self, id: ProviderId) -> String {
        let custom = match id {
            ProviderId::Google => self.google.as_deref(),
            ProviderId::OpenAi => self.openai.as_deref(),
            ProviderId::Anthropic => self.anthropic.as_deref(),
            ProviderId::Groq => self.groq.as_deref(),
            ProviderId::Mock => None,
        };
        custom
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| id.default_model())
            .to_string()
    }
}

/// Per-provider API base URL overrides (proxies, self-hosted gateways, tests).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointOverrides {
    pub google: Option<String>,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub groq: Option<String>,
}

impl EndpointOverrides {
    pub fn base_url_for(&self, id: ProviderId) -> String {
        let custom = match id {
            ProviderId::Google => self.google.as_deref(),
            ProviderId::OpenAi => self.openai.as_deref(),
            ProviderId::Anthropic => self.anthropic.as_deref(),
            ProviderId::Groq => self.groq.as_deref(),
            ProviderId::Mock => None,
        };
        custom
            .unwrap_or_else(|| default_base_url(id))
            .trim_end_matches('/')
            .to_string()
    }
}

/// Public API root for each hosted provider.
pub const fn default_base_url(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Google => "https://generativelanguage.googleapis.com/v1beta",
        ProviderId::OpenAi => "https://api.openai.com/v1",
        ProviderId::Anthropic => "https://api.anthropic.com/v1",
        ProviderId::Groq => "https://api.groq.com/openai/v1",
        ProviderId::Mock => "",
    }
}

/// Application configuration
///
/// API keys are not part of this; see
/// [`crate::ProviderCredentials::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source language preselected in front-ends
    #[serde(default = "default_source_lang")]
    pub source_lang: Lang,

    /// Target language preselected in front-ends
    #[serde(default = "default_target_lang")]
    pub target_lang: Lang,

    /// Generation limits and timeouts
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Model id overrides
    #[serde(default)]
    pub models: ModelOverrides,

    /// API base URL overrides
    #[serde(default)]
    pub endpoints: EndpointOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            dispatch: DispatchConfig::default(),
            models: ModelOverrides::default(),
            endpoints: EndpointOverrides::default(),
        }
    }
}

/// Prefix for environment overrides, e.g. `AI_TRANSLATOR__DISPATCH__TEMPERATURE`.
pub const ENV_PREFIX: &str = "AI_TRANSLATOR";

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, later sources winning:
    /// `~/.config/ai-translator/config.toml`, `./config.toml`, then
    /// `AI_TRANSLATOR__*` environment variables.
    ///
    /// Falls back to defaults when the layered config is unreadable.
    pub fn load() -> Self {
        let mut files = config::Config::builder();

        if let Some(config_dir) = config_dir() {
            let user_config = config_dir.join("ai-translator").join("config.toml");
            tracing::debug!("Looking for config at {}", user_config.display());
            files = files.add_source(config::File::from(user_config).required(false));
        }
        let files =
            files.add_source(config::File::from(PathBuf::from("config.toml")).required(false));

        Self::load_from(files, env_source())
    }

    /// Layer `env` over `files` and validate, falling back to defaults.
    fn load_from(files: ConfigBuilder<DefaultState>, env: config::Environment) -> Self {
        match Self::build_layered(files, env) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn build_layered(
        files: ConfigBuilder<DefaultState>,
        env: config::Environment,
    ) -> Result<Self> {
        let config: Self = files
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| Error::ConfigLoad(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values no backend would accept.
    pub fn validate(&self) -> Result<()> {
        let dispatch = &self.dispatch;
        if dispatch.max_output_tokens == 0 {
            return Err(Error::ConfigInvalid {
                field: "dispatch.max_output_tokens".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&dispatch.temperature) {
            return Err(Error::ConfigInvalid {
                field: "dispatch.temperature".to_string(),
                reason: format!("{} is outside 0.0..=2.0", dispatch.temperature),
            });
        }
        if dispatch.attempt_timeout_secs == 0 {
            return Err(Error::ConfigInvalid {
                field: "dispatch.attempt_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// `AI_TRANSLATOR__*` variables, `__` separating nested keys.
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Get the user's config directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// A language option for UI dropdowns
#[derive(Debug, Clone)]
pub struct LanguageOption {
    /// ISO language code (e.g., "en", "fr")
    pub code: &'static str,
    /// Display name (e.g., "English", "French")
    pub name: &'static str,
    /// Flag emoji
    pub flag: &'static str,
}

const LANGUAGES: &[LanguageOption] = &[
    LanguageOption { code: "en", name: "English", flag: "🇺🇸" },
    LanguageOption { code: "es", name: "Spanish", flag: "🇪🇸" },
    LanguageOption { code: "fr", name: "French", flag: "🇫🇷" },
    LanguageOption { code: "de", name: "German", flag: "🇩🇪" },
    LanguageOption { code: "it", name: "Italian", flag: "🇮🇹" },
    LanguageOption { code: "pt", name: "Portuguese", flag: "🇵🇹" },
    LanguageOption { code: "ru", name: "Russian", flag: "🇷🇺" },
    LanguageOption { code: "ja", name: "Japanese", flag: "🇯🇵" },
    LanguageOption { code: "ko", name: "Korean", flag: "🇰🇷" },
    LanguageOption { code: "zh", name: "Chinese", flag: "🇨🇳" },
    LanguageOption { code: "ar", name: "Arabic", flag: "🇸🇦" },
    LanguageOption { code: "hi", name: "Hindi", flag: "🇮🇳" },
    LanguageOption { code: "nl", name: "Dutch", flag: "🇳🇱" },
    LanguageOption { code: "sv", name: "Swedish", flag: "🇸🇪" },
    LanguageOption { code: "no", name: "Norwegian", flag: "🇳🇴" },
    LanguageOption { code: "da", name: "Danish", flag: "🇩🇰" },
    LanguageOption { code: "fi", name: "Finnish", flag: "🇫🇮" },
    LanguageOption { code: "pl", name: "Polish", flag: "🇵🇱" },
    LanguageOption { code: "tr", name: "Turkish", flag: "🇹🇷" },
    LanguageOption { code: "th", name: "Thai", flag: "🇹🇭" },
];

/// Languages offered as source and target.
pub fn languages() -> Vec<LanguageOption> {
    LANGUAGES.to_vec()
}

/// Default source language code
pub const DEFAULT_SOURCE_LANG: &str = "en";
/// Default target language code
pub const DEFAULT_TARGET_LANG: &str = "es";

/// Convert a language code to its English name.
///
/// Unknown codes are returned unchanged.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map_or(code, |l| l.name)
}

/// Get flag emoji for a language code.
///
/// Returns a globe emoji for unknown language codes.
pub fn flag_for_lang(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map_or("🌐", |l| l.flag)
}
