//! Translation route - one text, one dispatch.

use ai_translator_core::{Lang, ProviderId, TranslationRequest};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::TranslateForm;
use crate::helpers::validate_translate_input;
use crate::state::AppState;
use crate::templates::{ErrorTemplate, ResultTemplate};

/// Translate the submitted text - returns the result card HTML.
///
/// HTMX: Replaces `#result`. Rejected input comes back as an error card with
/// 422 so nothing reaches the dispatcher.
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TranslateForm>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("translate", %request_id);

    async move {
        let source = Lang::new(form.source_lang);
        let target = Lang::new(form.target_lang);

        if let Err(message) = validate_translate_input(&form.text, &source, &target) {
            debug!("Rejected input: {}", message);
            return (StatusCode::UNPROCESSABLE_ENTITY, ErrorTemplate::new(message)).into_response();
        }

        let requested = form
            .provider
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| {
                let parsed = ProviderId::parse(name);
                if parsed.is_none() {
                    warn!("Unknown provider '{}', using default selection", name);
                }
                parsed
            });

        let request = TranslationRequest::new(form.text, source, target).with_provider(requested);
        info!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source_lang,
            request.target_lang
        );

        match state.dispatcher.translate(&request).await {
            Ok(result) => {
                info!("Answered by {} ({:?})", result.provider_name, result.outcome);
                ResultTemplate::from(result).into_response()
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorTemplate::new(format!("Translation failed: {e}")),
                )
                    .into_response()
            }
        }
    }
    .instrument(span)
    .await
}
