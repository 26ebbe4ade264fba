//! Askama templates for HTMX responses.
//!
//! ## HTMX Patterns Used
//!
//! - **Fragment swaps**: the translate form posts with `hx-post` and swaps the
//!   returned partial into `#result`
//!
//! - **Disabled Elements**: `hx-disabled-elt` prevents double submits while a
//!   translation is in flight
//!
//! ## Template Structure
//!
//! - `base.html` - Common layout with CSS/JS
//! - `index.html` - Translator page
//! - `partials/` - Result and error fragments

use ai_translator_core::{
    LanguageOption, Outcome, ProviderDescriptor, ProviderId, ProviderRegistry, TranslationResult,
    languages,
};
use askama::Template;
use askama_web::WebTemplate;

// =============================================================================
// Full Page Templates
// =============================================================================

/// Entry in the provider dropdown.
pub struct ProviderOption {
    pub id: &'static str,
    pub name: String,
    pub model: String,
    pub description: String,
}

impl From<&ProviderDescriptor> for ProviderOption {
    fn from(d: &ProviderDescriptor) -> Self {
        Self {
            id: d.id.as_str(),
            name: d.display_name.clone(),
            model: d.model_id.clone(),
            description: d.description.clone(),
        }
    }
}

/// Translator page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub languages: Vec<LanguageOption>,
    pub default_source: String,
    pub default_target: String,
    /// Available providers in fallback order
    pub providers: Vec<ProviderOption>,
    pub selected_provider: &'static str,
    /// Drives the Gemini status card
    pub gemini_available: bool,
}

impl IndexTemplate {
    pub fn new(registry: &ProviderRegistry, default_source: &str, default_target: &str) -> Self {
        Self {
            languages: languages(),
            default_source: default_source.to_string(),
            default_target: default_target.to_string(),
            providers: registry
                .available_descriptors()
                .into_iter()
                .map(ProviderOption::from)
                .collect(),
            selected_provider: registry.default_selection().as_str(),
            gemini_available: registry.is_available(ProviderId::PREFERRED),
        }
    }
}

// =============================================================================
// Partial Templates (HTMX fragments)
// =============================================================================

/// Successful translation card.
#[derive(Template, WebTemplate)]
#[template(path = "partials/result.html")]
pub struct ResultTemplate {
    pub translated_text: String,
    pub provider_name: String,
    pub model_id: String,
    pub fallback: bool,
}

impl From<TranslationResult> for ResultTemplate {
    fn from(r: TranslationResult) -> Self {
        Self {
            fallback: r.outcome == Outcome::Fallback,
            translated_text: r.translated_text,
            provider_name: r.provider_name,
            model_id: r.model_id,
        }
    }
}

/// Inline error shown in place of a result.
#[derive(Template, WebTemplate)]
#[template(path = "partials/error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

impl ErrorTemplate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
