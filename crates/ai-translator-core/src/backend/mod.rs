mod anthropic;
mod gemini;
mod http;
mod openai;
mod traits;

pub use anthropic::AnthropicBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;
pub use traits::{BackendInfo, GenerateRequest, Generator};

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::Result;
use crate::provider::{ProviderCredentials, ProviderId};

/// Backend per hosted provider. Mock never has an entry.
pub type Backends = HashMap<ProviderId, Arc<dyn Generator>>;

/// Create a backend for every hosted provider that has a key configured.
pub fn create_backends(config: &AppConfig, credentials: &ProviderCredentials) -> Result<Backends> {
    let timeout = config.dispatch.attempt_timeout();
    let client = http::build_client(timeout)?;
    let mut backends = Backends::new();

    for id in ProviderId::ALL {
        let Some(key) = credentials.get(id) else {
            continue;
        };
        let base = config.endpoints.base_url_for(id);
        let backend: Arc<dyn Generator> = match id {
            ProviderId::Google => Arc::new(GeminiBackend::new(client.clone(), base, key, timeout)),
            ProviderId::OpenAi | ProviderId::Groq => {
                Arc::new(OpenAiBackend::new(client.clone(), id, base, key, timeout))
            }
            ProviderId::Anthropic => {
                Arc::new(AnthropicBackend::new(client.clone(), base, key, timeout))
            }
            ProviderId::Mock => continue,
        };
        debug!("Registered {} backend ({})", id, backend.info().protocol);
        backends.insert(id, backend);
    }

    Ok(backends)
}
