//! Sanitized ISBN used as the identity key of a resolution

use std::fmt;

use serde::Serialize;

use super::ResolveError;

/// Longest identifier kept; scanners may append a 2 or 5 digit EAN add-on.
const MAX_LEN: usize = 13;

/// Cleaned ISBN: ASCII digits and upper-case `X` only, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Strip everything that is not a digit or `X`/`x` from raw scanner or
    /// user input.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
            .map(|c| c.to_ascii_uppercase())
            .take(MAX_LEN)
            .collect();

        if cleaned.is_empty() {
            return Err(ResolveError::EmptyIdentifier);
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
