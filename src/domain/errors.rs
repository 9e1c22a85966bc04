//! Domain error types
//!
//! These errors are framework-agnostic. `SourceError` stays inside the
//! pipeline; only `ResolveError` reaches callers.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single upstream query or adapter call.
///
/// Every variant is recovered by the resolver: it moves on to the next
/// query variant or the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The call did not complete before its deadline
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// The body could not be parsed into the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The call succeeded but yielded nothing usable
    #[error("no usable data")]
    NoData,
    /// Network-level failure or unexpected status
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors surfaced to callers of the resolution pipeline.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing ISBN-like was left after sanitizing the identifier
    #[error("missing isbn")]
    EmptyIdentifier,
    /// Every applicable source was exhausted without a usable title
    #[error("not_found")]
    NotFound,
    /// Unexpected fault (client construction, runtime)
    #[error("{0}")]
    Internal(String),
}
