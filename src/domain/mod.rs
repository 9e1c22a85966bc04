//! Domain layer - Pure resolution abstractions
//!
//! This layer contains NO transport code (no Axum handlers, no reqwest).
//! Only value types, the source trait and error types.

pub mod errors;
pub mod fingerprint;
pub mod record;
pub mod sources;

pub use errors::{ResolveError, SourceError};
pub use fingerprint::Fingerprint;
pub use record::{MergedRecord, Source, SourceRecord, non_empty};
pub use sources::MetadataSource;
