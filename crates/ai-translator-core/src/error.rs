use thiserror::Error;

use crate::provider::ProviderId;

/// Unified error type for ai-translator-core
///
/// Backend errors never reach callers of the dispatcher: they are logged and
/// trigger a fallback. Only configuration problems and a dispatcher/registry
/// mismatch surface as `Err`.
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Backend Errors
    // ==========================================================================
    /// Backend API request failed (network, auth, quota, HTTP status)
    #[error("{provider} request failed: {reason}")]
    BackendRequest { provider: ProviderId, reason: String },

    /// Backend answered with something we could not use
    #[error("invalid {provider} response: {reason}")]
    BackendInvalidResponse { provider: ProviderId, reason: String },

    /// Rate limited by backend API
    #[error(
        "{provider} rate limited{}",
        retry_after.map(|s| format!(", retry after {s} seconds")).unwrap_or_default()
    )]
    BackendRateLimited {
        provider: ProviderId,
        retry_after: Option<u64>,
    },

    /// Backend call exceeded the per-attempt deadline
    #[error("{provider} request timed out after {seconds}s")]
    BackendTimeout { provider: ProviderId, seconds: u64 },

    // ==========================================================================
    // Dispatch Errors
    // ==========================================================================
    /// The dispatcher resolved a provider that has no backend registered.
    /// Indicates the registry and the backend table were built inconsistently.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(ProviderId),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },
}

impl Error {
    /// Provider the error originated from, for backend errors.
    pub const fn provider(&self) -> Option<ProviderId> {
        match self {
            Self::BackendRequest { provider, .. }
            | Self::BackendInvalidResponse { provider, .. }
            | Self::BackendRateLimited { provider, .. }
            | Self::BackendTimeout { provider, .. }
            | Self::UnsupportedProvider(provider) => Some(*provider),
            Self::ConfigLoad(_) | Self::ConfigInvalid { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
