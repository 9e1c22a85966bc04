//! Open Library edition/work/author graph
//!
//! The edition is the only mandatory hop. Author name, work description and
//! the HTML description fallback are each fetched best-effort: a failure
//! leaves the field absent without failing the lookup.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{fetch_json, fetch_text};
use crate::config::LookupConfig;
use crate::domain::{Fingerprint, MetadataSource, Source, SourceError, SourceRecord, non_empty};
use crate::modules::lookup::normalize::scrape_description;
use crate::modules::lookup::timeout::with_timeout;

#[derive(Debug, Deserialize)]
struct Edition {
    title: Option<String>,
    #[serde(default)]
    publishers: Vec<String>,
    publisher: Option<String>,
    publish_date: Option<String>,
    #[serde(default)]
    covers: Vec<i64>,
    #[serde(default)]
    languages: Vec<KeyRef>,
    #[serde(default)]
    authors: Vec<KeyRef>,
    #[serde(default)]
    works: Vec<KeyRef>,
    description: Option<TextValue>,
}

/// Reference to another resource, e.g. `{"key": "/works/OL45883W"}`
#[derive(Debug, Deserialize)]
struct KeyRef {
    #[serde(default)]
    key: String,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Work {
    description: Option<TextValue>,
}

/// Free text stored either as a bare string or as
/// `{"type": "/type/text", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Plain(String),
    Typed { value: String },
}

impl TextValue {
    fn into_text(self) -> String {
        match self {
            TextValue::Plain(text) | TextValue::Typed { value: text } => text,
        }
    }
}

/// Edition graph adapter
pub struct OpenLibrary {
    client: reqwest::Client,
    base_url: String,
    covers_url: String,
    timeout: Duration,
}

impl OpenLibrary {
    pub fn new(client: reqwest::Client, config: &LookupConfig) -> Self {
        Self {
            client,
            base_url: config.openlibrary_url.clone(),
            covers_url: config.openlibrary_covers_url.clone(),
            timeout: config.openlibrary_timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        with_timeout(self.timeout, fetch_json(self.client.get(&url), what)).await
    }

    async fn author_name(&self, author: &KeyRef) -> Option<String> {
        let path = format!("{}.json", resource_path(&author.key)?);
        match self.get_json::<Author>(&path, "Open Library author").await {
            Ok(author) => non_empty(author.name),
            Err(e) => {
                tracing::warn!("Open Library author lookup {} failed: {}", path, e);
                None
            }
        }
    }

    async fn work_description(&self, work: &KeyRef) -> Option<String> {
        let path = format!("{}.json", resource_path(&work.key)?);
        match self.get_json::<Work>(&path, "Open Library work").await {
            Ok(work) => non_empty(work.description.map(TextValue::into_text)),
            Err(e) => {
                tracing::warn!("Open Library work lookup {} failed: {}", path, e);
                None
            }
        }
    }

    async fn scraped_description(&self, isbn: &Fingerprint) -> Option<String> {
        let url = format!("{}/isbn/{}", self.base_url, isbn);
        let request = self.client.get(&url);
        match with_timeout(self.timeout, fetch_text(request, "Open Library page")).await {
            Ok(html) => scrape_description(&html),
            Err(e) => {
                tracing::debug!("Open Library page for {} unavailable: {}", isbn, e);
                None
            }
        }
    }

    /// Explicit cover id if the edition has one, else the ISBN-keyed image.
    /// The latter is best-effort and may not exist upstream.
    fn cover_url(&self, covers: &[i64], isbn: &Fingerprint) -> String {
        match covers.iter().find(|id| **id > 0) {
            Some(id) => format!("{}/b/id/{}-L.jpg", self.covers_url, id),
            None => isbn_cover_url(&self.covers_url, isbn),
        }
    }
}

#[async_trait]
impl MetadataSource for OpenLibrary {
    fn source(&self) -> Source {
        Source::OpenLibrary
    }

    async fn fetch(&self, isbn: &Fingerprint, _lang: &str) -> Result<SourceRecord, SourceError> {
        let edition: Edition = self
            .get_json(&format!("/isbn/{}.json", isbn), "Open Library edition")
            .await?;

        let author = match edition.authors.first() {
            Some(author) => self.author_name(author).await,
            None => None,
        };

        let mut description = non_empty(edition.description.map(TextValue::into_text));
        if description.is_none()
            && let Some(work) = edition.works.first()
        {
            description = self.work_description(work).await;
        }
        if description.is_none() {
            description = self.scraped_description(isbn).await;
        }

        let language = edition
            .languages
            .first()
            .and_then(|l| l.key.rsplit('/').next())
            .map(str::to_string);

        Ok(SourceRecord {
            isbn: Some(isbn.to_string()),
            title: non_empty(edition.title),
            author,
            publisher: non_empty(edition.publishers.into_iter().next().or(edition.publisher)),
            publication_date: non_empty(edition.publish_date),
            language: non_empty(language),
            description,
            cover_url: Some(self.cover_url(&edition.covers, isbn)),
        })
    }
}

/// Cover image keyed by ISBN on the covers service
pub fn isbn_cover_url(covers_url: &str, isbn: &Fingerprint) -> String {
    format!("{}/b/isbn/{}-L.jpg", covers_url, isbn)
}

fn resource_path(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() {
        None
    } else if key.starts_with('/') {
        Some(key.to_string())
    } else {
        Some(format!("/{}", key))
    }
}
