//! Metadata source trait definition
//!
//! Adapters for individual catalogs implement this contract.
//! Implementations live in `modules::integrations`.

use async_trait::async_trait;

use super::{Fingerprint, Source, SourceError, SourceRecord};

/// One external bibliographic catalog.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Tag used when this source contributes to a merged record
    fn source(&self) -> Source;

    /// Look up a fingerprint. `lang` is the caller's working language, which
    /// a source may use to bias its results.
    ///
    /// Implementations bound every outbound call with their own deadline and
    /// report `SourceError::NoData` when the catalog has nothing usable.
    async fn fetch(&self, isbn: &Fingerprint, lang: &str) -> Result<SourceRecord, SourceError>;
}
