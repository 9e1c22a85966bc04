//! Field-level merge of source records
//!
//! Sources are absorbed in priority order; each field keeps the first
//! non-empty value it receives.

use crate::domain::{Fingerprint, MergedRecord, Source, SourceRecord, non_empty};

pub(crate) struct RecordMerge {
    query: Fingerprint,
    corrected: Option<Fingerprint>,
    fields: SourceRecord,
    contributors: Vec<Source>,
}

impl RecordMerge {
    pub(crate) fn new(query: Fingerprint) -> Self {
        Self {
            query,
            corrected: None,
            fields: SourceRecord::default(),
            contributors: Vec::new(),
        }
    }

    /// Title and author are what the catalog form cannot do without; once
    /// both are known no further source is consulted.
    pub(crate) fn has_required_fields(&self) -> bool {
        self.fields.title.is_some() && self.fields.author.is_some()
    }

    pub(crate) fn absorb(&mut self, source: Source, record: SourceRecord) {
        let f = &mut self.fields;
        let contributed = [
            fill(&mut f.title, record.title),
            fill(&mut f.author, record.author),
            fill(&mut f.publisher, record.publisher),
            fill(&mut f.publication_date, record.publication_date),
            fill(&mut f.language, record.language),
            fill(&mut f.description, record.description),
            fill(&mut f.cover_url, record.cover_url),
        ]
        .contains(&true);

        if !contributed {
            return;
        }
        if self.corrected.is_none() {
            self.corrected = record
                .isbn
                .and_then(|isbn| Fingerprint::parse(&isbn).ok());
        }
        self.contributors.push(source);
    }

    /// `None` when no source supplied a title.
    pub(crate) fn finish(self) -> Option<MergedRecord> {
        let title = self.fields.title?;
        let source = match self.contributors.as_slice() {
            [single] => *single,
            _ => Source::Merged,
        };

        Some(MergedRecord {
            source,
            isbn: self.corrected.unwrap_or(self.query),
            title,
            author: self.fields.author,
            publisher: self.fields.publisher,
            publication_date: self.fields.publication_date,
            language: self.fields.language,
            description: self.fields.description,
            cover_url: self.fields.cover_url,
        })
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) -> bool {
    if slot.is_some() {
        return false;
    }
    match non_empty(value) {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp() -> Fingerprint {
        Fingerprint::parse("2070368226").unwrap()
    }

    fn record(title: Option<&str>, author: Option<&str>) -> SourceRecord {
        SourceRecord {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            ..SourceRecord::default()
        }
    }

    #[test]
    fn test_first_non_empty_value_wins() {
        let mut merge = RecordMerge::new(fp());
        merge.absorb(Source::Bnf, record(Some("Le petit prince"), None));
        assert!(!merge.has_required_fields());
        merge.absorb(
            Source::Google,
            record(Some("The Little Prince"), Some("Antoine de Saint-Exupéry")),
        );
        assert!(merge.has_required_fields());

        let merged = merge.finish().unwrap();
        assert_eq!(merged.title, "Le petit prince");
        assert_eq!(merged.author.as_deref(), Some("Antoine de Saint-Exupéry"));
        assert_eq!(merged.source, Source::Merged);
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let mut merge = RecordMerge::new(fp());
        merge.absorb(Source::Bnf, record(Some("  "), Some("")));
        merge.absorb(Source::OpenLibrary, record(Some("Dune"), None));

        let merged = merge.finish().unwrap();
        assert_eq!(merged.title, "Dune");
        assert_eq!(merged.source, Source::OpenLibrary);
    }

    #[test]
    fn test_corrected_isbn_from_first_contributor() {
        let mut merge = RecordMerge::new(fp());
        let mut bnf = record(Some("Le petit prince"), None);
        bnf.isbn = Some("9782070368228".to_string());
        merge.absorb(Source::Bnf, bnf);

        let merged = merge.finish().unwrap();
        assert_eq!(merged.isbn.as_str(), "9782070368228");
    }

    #[test]
    fn test_isbn_defaults_to_query() {
        let mut merge = RecordMerge::new(fp());
        merge.absorb(Source::Google, record(Some("Le petit prince"), None));
        assert_eq!(merge.finish().unwrap().isbn.as_str(), "2070368226");
    }

    #[test]
    fn test_no_title_means_nothing() {
        let mut merge = RecordMerge::new(fp());
        merge.absorb(Source::Google, record(None, Some("Someone")));
        assert!(merge.finish().is_none());
    }
}
