use std::fmt;

use thiserror::Error;

use crate::fragment::Provenance;

/// A position inside one fragment: its provenance and 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub origin: Provenance,
    pub line: usize,
}

impl Location {
    pub fn new(origin: Provenance, line: usize) -> Self {
        Self { origin, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

/// Every way producing a license can fail.
///
/// Nothing is repaired silently: structural problems are reported with the
/// location that caused them and abort the license being processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{at}: {scope} is never closed")]
    UnterminatedScope { scope: &'static str, at: Location },

    #[error("{at}: close marker does not match the innermost {expected} opened at {opened_at}")]
    MismatchedClose {
        expected: &'static str,
        opened_at: Location,
        at: Location,
    },

    #[error("{at}: close marker without an open scope")]
    UnexpectedClose { at: Location },

    #[error("{at}: reference `{id}` is used but never defined")]
    UndefinedReference { id: String, at: Location },

    #[error("{at}: reference `{id}` was already defined at {first}")]
    DuplicateReferenceId {
        id: String,
        first: Location,
        at: Location,
    },

    #[error("unknown format selector `{0}`")]
    UnknownFormatSelector(String),

    #[error("required metadata field `{0}` is missing or blank")]
    MissingField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::new(Provenance::Body, 12).to_string(), "body:12");
    }

    #[test]
    fn errors_name_their_location() {
        let err = Error::UnterminatedScope {
            scope: "admonition",
            at: Location::new(Provenance::Changelog, 3),
        };
        assert_eq!(err.to_string(), "changelog:3: admonition is never closed");
    }
}
