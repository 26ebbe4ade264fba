use ai_translator_core::{AppConfig, Dispatcher, ProviderCredentials};
use anyhow::{Context, Result};

/// Global application state
///
/// Everything here is read-only after startup, so handlers share it through
/// an `Arc` without locking.
pub struct AppState {
    /// Provider selection and fallback
    pub dispatcher: Dispatcher,
    /// Base configuration (default languages, dispatch limits)
    pub config: AppConfig,
}

impl AppState {
    /// Build the dispatcher from configuration and API keys.
    pub fn new(config: AppConfig, credentials: &ProviderCredentials) -> Result<Self> {
        let dispatcher = Dispatcher::from_config(&config, credentials)
            .context("Failed to create dispatcher")?;

        Ok(Self { dispatcher, config })
    }

    /// Wrap an already-built dispatcher (used by tests with scripted backends).
    #[cfg(test)]
    pub const fn with_dispatcher(dispatcher: Dispatcher, config: AppConfig) -> Self {
        Self { dispatcher, config }
    }
}
