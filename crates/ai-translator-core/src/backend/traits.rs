use async_trait::async_trait;

use crate::error::Result;
use crate::provider::ProviderId;

/// Information about a generation backend
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Registry entry this backend serves
    pub provider: ProviderId,
    /// Wire protocol spoken by the backend
    pub protocol: &'static str,
}

/// One text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Backend-specific model identifier
    pub model: String,
    /// System instruction
    pub system: String,
    /// User turn
    pub prompt: String,
    /// Output token ceiling
    pub max_output_tokens: u32,
    /// Sampling temperature; `None` leaves the backend default
    pub temperature: Option<f32>,
}

/// Trait for hosted text-generation backends
///
/// Implementations return `Err` on any network, auth, quota or decoding
/// problem and plain text otherwise.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Get information about this backend
    fn info(&self) -> BackendInfo;

    /// Get the provider id (convenience method)
    fn provider(&self) -> ProviderId {
        self.info().provider
    }

    /// Run one generation request
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}
