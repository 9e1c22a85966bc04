//! Adapters for external bibliographic catalogs and the translation service

pub mod bnf;
pub mod google_books;
pub mod openlibrary;
pub mod translate;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::SourceError;

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Transport(e.to_string())
    }
}

/// Send a request and read the body as text. A 404 means the catalog has no
/// such resource and maps to `NoData`.
pub(crate) async fn fetch_text(
    request: RequestBuilder,
    what: &str,
) -> Result<String, SourceError> {
    let resp = request.send().await?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NoData);
    }
    if !status.is_success() {
        return Err(SourceError::Transport(format!(
            "{} returned status: {}",
            what, status
        )));
    }

    resp.text()
        .await
        .map_err(|e| SourceError::Transport(format!("Failed to read {} body: {}", what, e)))
}

/// Like [`fetch_text`], then deserialize the body as JSON.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T, SourceError> {
    let body = fetch_text(request, what).await?;
    serde_json::from_str(&body).map_err(|e| {
        SourceError::MalformedResponse(format!("Failed to parse {} JSON: {}", what, e))
    })
}
