use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::fetch_json;
use crate::config::LookupConfig;
use crate::domain::{Fingerprint, MetadataSource, Source, SourceError, SourceRecord, non_empty};
use crate::modules::lookup::timeout::with_timeout;

#[derive(Debug, Deserialize)]
struct GoogleBooksResponse {
    items: Option<Vec<GoogleBookItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleBookItem {
    #[serde(rename = "volumeInfo")]
    volume_info: GoogleVolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    published_date: Option<String>,
    language: Option<String>,
    description: Option<String>,
    image_links: Option<GoogleImageLinks>,
}

#[derive(Debug, Deserialize)]
struct GoogleImageLinks {
    thumbnail: Option<String>,
    // smallThumbnail is also available but often too small
}

/// Volume search adapter
pub struct GoogleBooks {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    lang_bias: bool,
    timeout: Duration,
}

impl GoogleBooks {
    pub fn new(client: reqwest::Client, config: &LookupConfig) -> Self {
        Self {
            client,
            base_url: config.google_books_url.clone(),
            api_key: config.google_books_key.clone(),
            lang_bias: config.google_books_lang_bias,
            timeout: config.google_books_timeout,
        }
    }

    async fn search(&self, isbn: &Fingerprint, lang: &str) -> Result<SourceRecord, SourceError> {
        let url = format!("{}/books/v1/volumes", self.base_url);

        let mut params = vec![
            ("q", format!("isbn:{}", isbn)),
            ("printType", "books".to_string()),
        ];
        if self.lang_bias && !lang.is_empty() {
            params.push(("langRestrict", lang.to_string()));
        }
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let parsed: GoogleBooksResponse =
            fetch_json(self.client.get(&url).query(&params), "Google Books").await?;

        let volume = parsed
            .items
            .and_then(|items| items.into_iter().next())
            .map(|item| item.volume_info)
            .ok_or(SourceError::NoData)?;

        Ok(SourceRecord {
            isbn: Some(isbn.to_string()),
            title: non_empty(volume.title),
            author: non_empty(volume.authors.and_then(|a| a.into_iter().next())),
            publisher: non_empty(volume.publisher),
            publication_date: non_empty(volume.published_date),
            language: non_empty(volume.language),
            description: non_empty(volume.description),
            // Google Books returns http links often, upgrade to https
            cover_url: non_empty(
                volume
                    .image_links
                    .and_then(|links| links.thumbnail)
                    .map(|thumb| thumb.replacen("http://", "https://", 1)),
            ),
        })
    }
}

#[async_trait]
impl MetadataSource for GoogleBooks {
    fn source(&self) -> Source {
        Source::Google
    }

    async fn fetch(&self, isbn: &Fingerprint, lang: &str) -> Result<SourceRecord, SourceError> {
        with_timeout(self.timeout, self.search(isbn, lang)).await
    }
}
