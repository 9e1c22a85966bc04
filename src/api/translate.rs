use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    /// Target language code; the configured default when absent
    pub target: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    pub text: String,
}

/// Translate free text. Always answers 200: on failure the original text is
/// echoed back, and an unreadable body counts as empty text.
#[utoipa::path(
    post,
    path = "/api/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated text, or the input when translation failed", body = TranslateResponse)
    )
)]
pub async fn translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Json<TranslateResponse> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(e) => {
            tracing::debug!("Unreadable translate request: {}", e);
            return Json(TranslateResponse {
                text: String::new(),
            });
        }
    };

    if req.text.trim().is_empty() {
        return Json(TranslateResponse {
            text: String::new(),
        });
    }

    let target = req
        .target
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(state.resolver.default_language())
        .to_string();

    let text = state
        .resolver
        .translator()
        .translate_or_keep(req.text, &target)
        .await;

    Json(TranslateResponse { text })
}
