//! Partial and merged bibliographic records

use serde::Serialize;
use utoipa::ToSchema;

use super::Fingerprint;

/// Which upstream catalog supplied the data of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// National library SRU endpoint (Dublin Core)
    Bnf,
    /// General book catalog volume search
    Google,
    /// Open collaborative edition/work graph
    OpenLibrary,
    /// Fields were taken from more than one source
    Merged,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Bnf => "bnf",
            Source::Google => "google",
            Source::OpenLibrary => "openlibrary",
            Source::Merged => "merged",
        }
    }
}

/// What one adapter said about a fingerprint. `None` means the source was
/// silent on that field; adapters never store empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecord {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

impl SourceRecord {
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }
}

/// Final result of a resolution, returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MergedRecord {
    pub source: Source,
    #[schema(value_type = String, example = "9782070368228")]
    pub isbn: Fingerprint,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

/// Trim a scraped value and drop it when nothing is left.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_drops_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some(" Gallimard ".to_string())),
            Some("Gallimard".to_string())
        );
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::OpenLibrary).unwrap(), "\"openlibrary\"");
        assert_eq!(Source::Bnf.as_str(), "bnf");
    }
}
