//! Provider routes - JSON views of the registry.

use ai_translator_core::{ProviderDescriptor, ProviderId};
use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Available providers in fallback order.
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<Vec<ProviderDescriptor>> {
    Json(
        state
            .dispatcher
            .registry()
            .available_descriptors()
            .into_iter()
            .cloned()
            .collect(),
    )
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub providers: Vec<ProviderDescriptor>,
    pub preferred: ProviderId,
    pub preferred_available: bool,
    pub default_selection: ProviderId,
}

/// Every known provider with its availability.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let registry = state.dispatcher.registry();
    Json(StatusResponse {
        providers: registry.descriptors().to_vec(),
        preferred: ProviderId::PREFERRED,
        preferred_available: registry.is_available(ProviderId::PREFERRED),
        default_selection: registry.default_selection(),
    })
}
