//! Source fragments: the immutable pieces of markup a license is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a fragment came from. Every placed node keeps its provenance so that
/// errors and placement decisions can name the section involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Prepend,
    Header,
    Body,
    Interpretation,
    Boilerplate,
    Embed,
    Disclaimer,
    AdaptationDisclaimer,
    Changelog,
    Original,
    Outro,
}

impl Provenance {
    pub const ALL: [Provenance; 11] = [
        Provenance::Prepend,
        Provenance::Header,
        Provenance::Body,
        Provenance::Interpretation,
        Provenance::Boilerplate,
        Provenance::Embed,
        Provenance::Disclaimer,
        Provenance::AdaptationDisclaimer,
        Provenance::Changelog,
        Provenance::Original,
        Provenance::Outro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Prepend => "prepend",
            Provenance::Header => "header",
            Provenance::Body => "body",
            Provenance::Interpretation => "interpretation",
            Provenance::Boilerplate => "boilerplate",
            Provenance::Embed => "embed",
            Provenance::Disclaimer => "disclaimer",
            Provenance::AdaptationDisclaimer => "adaptation_disclaimer",
            Provenance::Changelog => "changelog",
            Provenance::Original => "original",
            Provenance::Outro => "outro",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of raw markup tagged with its provenance.
///
/// Immutable once captured: the fields are private and only readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    provenance: Provenance,
    raw_text: String,
    ordering_hint: u32,
}

impl SourceFragment {
    /// Captures `raw_text`, using the provenance's declaration order as hint.
    pub fn new(provenance: Provenance, raw_text: impl Into<String>) -> Self {
        let ordering_hint = Provenance::ALL
            .iter()
            .position(|p| *p == provenance)
            .map_or(u32::MAX, |i| i as u32);
        Self {
            provenance,
            raw_text: raw_text.into(),
            ordering_hint,
        }
    }

    pub fn with_ordering_hint(mut self, hint: u32) -> Self {
        self.ordering_hint = hint;
        self
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn ordering_hint(&self) -> u32 {
        self.ordering_hint
    }

    /// True when the fragment holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}
