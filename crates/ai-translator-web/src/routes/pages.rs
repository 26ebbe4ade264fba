//! Page routes - full HTML page renders.

use axum::extract::State;
use std::sync::Arc;

use crate::state::AppState;
use crate::templates::IndexTemplate;

/// Translator page with the default provider preselected.
pub async fn index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    IndexTemplate::new(
        state.dispatcher.registry(),
        state.config.source_lang.as_str(),
        state.config.target_lang.as_str(),
    )
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
