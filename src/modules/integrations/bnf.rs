//! BNF (Bibliothèque nationale de France) integration via the catalogue SRU endpoint
//!
//! The catalogue indexes ISBN, EAN and other identifiers inconsistently, so a
//! lookup walks several indexes until one returns a record. Records are
//! requested in the Dublin Core schema; every element may be absent, single
//! or repeated.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::fetch_text;
use crate::config::LookupConfig;
use crate::domain::{Fingerprint, MetadataSource, Source, SourceError, SourceRecord, non_empty};
use crate::modules::lookup::normalize::{
    collapse_whitespace, isbn_from_identifiers, language_label, strip_author_role,
};
use crate::modules::lookup::timeout::with_timeout;

/// SRU indexes tried in order: ISBN, EAN, then the catch-all index which
/// also covers identifiers stored outside the dedicated fields.
const QUERY_INDEXES: [&str; 3] = ["bib.isbn", "bib.ean", "bib.anywhere"];

/// Dublin Core elements the adapter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DcElement {
    Title,
    Creator,
    Publisher,
    Date,
    Language,
    Description,
    Identifier,
}

impl DcElement {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(DcElement::Title),
            b"creator" => Some(DcElement::Creator),
            b"publisher" => Some(DcElement::Publisher),
            b"date" => Some(DcElement::Date),
            b"language" => Some(DcElement::Language),
            b"description" => Some(DcElement::Description),
            b"identifier" => Some(DcElement::Identifier),
            _ => None,
        }
    }
}

/// One Dublin Core element as it appeared in the record.
#[derive(Debug, Clone, PartialEq)]
enum DcValue {
    Single(String),
    Repeated(Vec<String>),
}

impl DcValue {
    fn push(&mut self, value: String) {
        match self {
            DcValue::Single(first) => {
                *self = DcValue::Repeated(vec![std::mem::take(first), value]);
            }
            DcValue::Repeated(values) => values.push(value),
        }
    }

    /// Every occurrence, in document order
    fn values(&self) -> &[String] {
        match self {
            DcValue::Single(value) => std::slice::from_ref(value),
            DcValue::Repeated(values) => values,
        }
    }
}

#[derive(Debug, Default)]
struct DcRecord {
    fields: HashMap<DcElement, DcValue>,
}

impl DcRecord {
    fn add(&mut self, element: DcElement, value: &str) {
        if value.is_empty() {
            return;
        }
        match self.fields.get_mut(&element) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                self.fields
                    .insert(element, DcValue::Single(value.to_string()));
            }
        }
    }

    fn all(&self, element: DcElement) -> &[String] {
        self.fields
            .get(&element)
            .map(DcValue::values)
            .unwrap_or_default()
    }

    fn first(&self, element: DcElement) -> Option<&str> {
        self.all(element).first().map(String::as_str)
    }
}

/// Catalogue SRU adapter
pub struct BnfSru {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BnfSru {
    pub fn new(client: reqwest::Client, config: &LookupConfig) -> Self {
        Self {
            client,
            base_url: config.bnf_sru_url.clone(),
            timeout: config.bnf_timeout,
        }
    }

    async fn search(&self, index: &str, isbn: &Fingerprint) -> Result<Vec<DcRecord>, SourceError> {
        let query = format!("{} all \"{}\"", index, isbn);
        let request = self.client.get(&self.base_url).query(&[
            ("version", "1.2"),
            ("operation", "searchRetrieve"),
            ("query", query.as_str()),
            ("recordSchema", "dublincore"),
            ("maximumRecords", "1"),
        ]);

        let xml = fetch_text(request, "BNF SRU").await?;
        parse_records(&xml)
    }
}

#[async_trait]
impl MetadataSource for BnfSru {
    fn source(&self) -> Source {
        Source::Bnf
    }

    async fn fetch(&self, isbn: &Fingerprint, _lang: &str) -> Result<SourceRecord, SourceError> {
        let mut last_error = None;

        for index in QUERY_INDEXES {
            match with_timeout(self.timeout, self.search(index, isbn)).await {
                Ok(records) => match records.into_iter().next() {
                    Some(record) => {
                        tracing::debug!("BNF {} matched {}", index, isbn);
                        let record = to_source_record(&record, isbn);
                        return if record.has_title() {
                            Ok(record)
                        } else {
                            Err(SourceError::NoData)
                        };
                    }
                    None => tracing::debug!("BNF {} returned no record for {}", index, isbn),
                },
                Err(SourceError::NoData) => {
                    tracing::debug!("BNF {} returned nothing for {}", index, isbn)
                }
                Err(e) => {
                    tracing::warn!("BNF {} query failed for {}: {}", index, isbn, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SourceError::NoData))
    }
}

/// Collect the Dublin Core payload of every `recordData` block of an SRU
/// search response.
fn parse_records(xml: &str) -> Result<Vec<DcRecord>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<DcRecord> = None;
    let mut element: Option<DcElement> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = e.local_name();
                if local.as_ref() == b"recordData" {
                    current = Some(DcRecord::default());
                } else if current.is_some() {
                    element = DcElement::from_local_name(local.as_ref());
                    text.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if element.is_some() {
                    let unescaped = e.unescape().map_err(|e| {
                        SourceError::MalformedResponse(format!("BNF XML text: {}", e))
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if element.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) => {
                let local = e.local_name();
                if local.as_ref() == b"recordData" {
                    records.extend(current.take());
                    element = None;
                } else if let Some(el) = element
                    && let Some(record) = current.as_mut()
                    && DcElement::from_local_name(local.as_ref()) == Some(el)
                {
                    record.add(el, text.trim());
                    element = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SourceError::MalformedResponse(format!(
                    "BNF XML parse error at {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(records)
}

fn to_source_record(record: &DcRecord, isbn: &Fingerprint) -> SourceRecord {
    let description = record.all(DcElement::Description);

    SourceRecord {
        isbn: Some(
            isbn_from_identifiers(record.all(DcElement::Identifier).iter().map(String::as_str))
                .unwrap_or_else(|| isbn.to_string()),
        ),
        title: non_empty(record.first(DcElement::Title).map(collapse_whitespace)),
        author: non_empty(record.first(DcElement::Creator).map(strip_author_role)),
        publisher: non_empty(record.first(DcElement::Publisher).map(str::to_string)),
        publication_date: non_empty(record.first(DcElement::Date).map(str::to_string)),
        language: pick_language(record.all(DcElement::Language)),
        description: non_empty((!description.is_empty()).then(|| description.join("\n"))),
        cover_url: None,
    }
}

/// Records often carry both "français" and "fre"; the long form wins.
fn pick_language(values: &[String]) -> Option<String> {
    if let Some(long) = values.iter().find(|v| v.trim().chars().count() > 3) {
        return Some(long.trim().to_string());
    }
    let code = values.first()?.trim();
    Some(
        language_label(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string()),
    )
}
