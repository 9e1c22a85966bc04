//! Best-effort description translation
//!
//! Uses the public `translate_a/single` endpoint. Whatever goes wrong, the
//! caller gets its original text back.

use serde_json::Value;

use super::fetch_json;
use crate::config::LookupConfig;
use crate::domain::SourceError;

/// Descriptions shorter than this are left alone
const MIN_TRANSLATABLE_CHARS: usize = 20;

pub struct Translator {
    client: reqwest::Client,
    base_url: String,
}

impl Translator {
    pub fn new(client: reqwest::Client, config: &LookupConfig) -> Self {
        Self {
            client,
            base_url: config.translate_url.clone(),
        }
    }

    /// Translate a resolved description into `target`, keeping `text` when it
    /// is too short or when translation fails for any reason.
    pub async fn enrich(&self, text: String, target: &str) -> String {
        if text.trim().chars().count() < MIN_TRANSLATABLE_CHARS {
            return text;
        }
        self.translate_or_keep(text, target).await
    }

    /// Translate any non-blank text, keeping it on failure.
    pub async fn translate_or_keep(&self, text: String, target: &str) -> String {
        match self.translate(&text, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation to {} failed, keeping original: {}", target, e);
                text
            }
        }
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, SourceError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let request = self.client.get(&url).query(&[
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ]);

        let body: Value = fetch_json(request, "translation").await?;
        join_segments(&body).ok_or_else(|| {
            SourceError::MalformedResponse("translation response has no segments".to_string())
        })
    }
}

/// The response is `[[["translated", "original", ...], ...], ...]`; the
/// translation is the concatenation of the first item of each segment.
fn join_segments(body: &Value) -> Option<String> {
    let translated: String = body
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        None
    } else {
        Some(translated)
    }
}
