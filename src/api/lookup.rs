use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{MergedRecord, ResolveError};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IsbnQuery {
    /// Raw identifier; everything but digits and X is ignored
    #[serde(default)]
    pub isbn: String,
    /// Target language of the description (defaults to the configured one)
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LangQuery {
    /// Target language of the description
    pub lang: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/isbn",
    params(IsbnQuery),
    responses(
        (status = 200, description = "Metadata resolved", body = MergedRecord),
        (status = 400, description = "Identifier has no ISBN characters"),
        (status = 404, description = "No catalog returned a title"),
        (status = 500, description = "Internal failure")
    )
)]
pub async fn lookup_isbn(
    State(state): State<AppState>,
    Query(params): Query<IsbnQuery>,
) -> Response {
    lookup(&state, &params.isbn, params.lang.as_deref()).await
}

#[utoipa::path(
    get,
    path = "/api/lookup/{isbn}",
    params(
        ("isbn" = String, Path, description = "Raw identifier"),
        LangQuery
    ),
    responses(
        (status = 200, description = "Metadata resolved", body = MergedRecord),
        (status = 400, description = "Identifier has no ISBN characters"),
        (status = 404, description = "No catalog returned a title")
    )
)]
pub async fn lookup_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Query(params): Query<LangQuery>,
) -> Response {
    lookup(&state, &isbn, params.lang.as_deref()).await
}

async fn lookup(state: &AppState, raw: &str, lang: Option<&str>) -> Response {
    match state.resolver.resolve(raw, lang).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            let status = match e {
                ResolveError::EmptyIdentifier => StatusCode::BAD_REQUEST,
                ResolveError::NotFound => StatusCode::NOT_FOUND,
                ResolveError::Internal(_) => {
                    tracing::error!("Lookup of {:?} failed: {}", raw, e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
