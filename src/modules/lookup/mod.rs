//! ISBN metadata resolution
//!
//! Sources are consulted one after another in priority order (national
//! library, general catalog, open catalog) and merged field by field. A
//! source is skipped once title and author are known. Any failure of a single
//! source is logged and absorbed; only "not found" and internal faults reach
//! the caller.

pub(crate) mod merge;
pub mod normalize;
pub mod timeout;

use std::time::Duration;

use crate::config::LookupConfig;
use crate::domain::{Fingerprint, MergedRecord, MetadataSource, ResolveError, SourceError};
use crate::modules::integrations::bnf::BnfSru;
use crate::modules::integrations::google_books::GoogleBooks;
use crate::modules::integrations::openlibrary::{OpenLibrary, isbn_cover_url};
use crate::modules::integrations::translate::Translator;
use merge::RecordMerge;
use normalize::normalize_language;

/// Safety net for calls that are not otherwise bounded (translation).
const CLIENT_TIMEOUT: Duration = Duration::from_secs(20);

pub struct Resolver {
    sources: Vec<Box<dyn MetadataSource>>,
    translator: Translator,
    translate_descriptions: bool,
    covers_url: String,
    default_language: String,
}

impl Resolver {
    pub fn new(
        sources: Vec<Box<dyn MetadataSource>>,
        translator: Translator,
        config: &LookupConfig,
    ) -> Self {
        Self {
            sources,
            translator,
            translate_descriptions: config.translate_descriptions,
            covers_url: config.openlibrary_covers_url.clone(),
            default_language: config.target_language.clone(),
        }
    }

    /// Resolver wired to the production catalogs, sharing one HTTP client.
    pub fn from_config(config: &LookupConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|e| ResolveError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let sources: Vec<Box<dyn MetadataSource>> = vec![
            Box::new(BnfSru::new(client.clone(), config)),
            Box::new(GoogleBooks::new(client.clone(), config)),
            Box::new(OpenLibrary::new(client.clone(), config)),
        ];

        Ok(Self::new(sources, Translator::new(client, config), config))
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Sanitize `raw` and resolve it. `lang` falls back to the configured
    /// target language.
    pub async fn resolve(
        &self,
        raw: &str,
        lang: Option<&str>,
    ) -> Result<MergedRecord, ResolveError> {
        let isbn = Fingerprint::parse(raw)?;
        let lang = lang
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.default_language.as_str());
        self.resolve_fingerprint(&isbn, lang).await
    }

    pub async fn resolve_fingerprint(
        &self,
        isbn: &Fingerprint,
        lang: &str,
    ) -> Result<MergedRecord, ResolveError> {
        let mut merge = RecordMerge::new(isbn.clone());

        for source in &self.sources {
            let name = source.source().as_str();
            if merge.has_required_fields() {
                tracing::debug!("Title and author known for {}, skipping {}", isbn, name);
                break;
            }

            match source.fetch(isbn, lang).await {
                Ok(record) => {
                    tracing::debug!("{} answered for {}", name, isbn);
                    merge.absorb(source.source(), record);
                }
                Err(SourceError::NoData) => tracing::debug!("{} has nothing for {}", name, isbn),
                Err(e) => tracing::warn!("{} lookup failed for {}: {}", name, isbn, e),
            }
        }

        let mut record = merge.finish().ok_or(ResolveError::NotFound)?;

        record.language = record.language.as_deref().map(normalize_language);
        if record.cover_url.is_none() {
            record.cover_url = Some(isbn_cover_url(&self.covers_url, &record.isbn));
        }
        if self.translate_descriptions
            && let Some(description) = record.description.take()
        {
            record.description = Some(self.translator.enrich(description, lang).await);
        }

        tracing::info!("Resolved {} via {}", isbn, record.source.as_str());
        Ok(record)
    }
}
