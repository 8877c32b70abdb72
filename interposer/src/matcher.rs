//! Path matching.
//!
//! A path is intercepted when its text ends with the configured suffix. The
//! comparison works on raw bytes, exactly as they were passed to the C
//! function: no normalization, no case folding and no UTF-8 decoding.

use crate::Error;

/// Outcome of matching a path against a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    Match,
    NoMatch,
    /// One of the inputs was missing (a null pointer on the C side). Callers
    /// must not intercept in this case.
    Indeterminate,
}

impl Match {
    pub fn is_match(self) -> bool {
        self == Match::Match
    }
}

/// Check whether `path` ends with `suffix`.
///
/// A suffix longer than the path never matches. An empty suffix matches any
/// path, which is why [`Suffix`] refuses to hold one.
pub fn ends_with(path: Option<&[u8]>, suffix: Option<&[u8]>) -> Match {
    match (path, suffix) {
        (Some(path), Some(suffix)) if path.ends_with(suffix) => Match::Match,
        (Some(_), Some(_)) => Match::NoMatch,
        _ => Match::Indeterminate,
    }
}

/// The configured path suffix.
///
/// It is validated on construction so that it can be compared against C
/// strings: it must not be empty and must not contain NUL bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suffix(&'static str);

impl Suffix {
    pub fn new(suffix: &'static str) -> Result<Self, Error> {
        Self::validate(suffix)?;
        Ok(Suffix(suffix))
    }

    /// Validate a suffix without keeping it. Used by the build script, which
    /// only has an owned `String` at hand.
    pub fn validate(suffix: &str) -> Result<(), Error> {
        if suffix.is_empty() {
            return Err(Error::EmptySuffix);
        }
        match suffix.bytes().position(|b| b == 0) {
            Some(offset) => Err(Error::SuffixContainsNul(offset)),
            None => Ok(()),
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.0.as_bytes()
    }

    /// Match a (possibly missing) path against this suffix.
    pub fn matches(&self, path: Option<&[u8]>) -> Match {
        ends_with(path, Some(self.as_bytes()))
    }
}
