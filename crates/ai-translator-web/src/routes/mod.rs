//! HTTP route handlers for the translator web application.
//!
//! `/` and `/api/translate` return HTML for HTMX consumption; the provider
//! endpoints return JSON.

mod pages;
mod providers;
mod translate;

pub use pages::{health, index};
pub use providers::{list_providers, status};
pub use translate::translate_text;

use serde::Deserialize;

/// Form data for translation.
#[derive(Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
    /// Provider id; missing or unknown means the default selection
    #[serde(default)]
    pub provider: Option<String>,
}
