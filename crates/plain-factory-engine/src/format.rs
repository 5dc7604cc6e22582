//! Target formats and the selector that chooses among them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Full dialect for the site renderer.
    Markdown,
    /// Portable markdown for export.
    PlainMarkdown,
    /// Natural-language text only.
    Plaintext,
    /// Self-contained markdown with HTML islands for embedding.
    ReaderEmbed,
}

/// Which optional sections and constructs a format supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Sections may be laid out as switchable tabs.
    pub tabbed: bool,
    pub boilerplate: bool,
    pub original: bool,
    pub disclaimers: bool,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Markdown,
        FormatKind::PlainMarkdown,
        FormatKind::Plaintext,
        FormatKind::ReaderEmbed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::Markdown => "markdown",
            FormatKind::PlainMarkdown => "plain_markdown",
            FormatKind::Plaintext => "plaintext",
            FormatKind::ReaderEmbed => "reader_embed",
        }
    }

    pub fn capabilities(self) -> Capabilities {
        match self {
            FormatKind::Markdown => Capabilities {
                tabbed: true,
                boilerplate: false,
                original: true,
                disclaimers: true,
            },
            FormatKind::PlainMarkdown => Capabilities {
                tabbed: false,
                boilerplate: false,
                original: true,
                disclaimers: true,
            },
            FormatKind::Plaintext => Capabilities {
                tabbed: false,
                boilerplate: false,
                original: false,
                disclaimers: true,
            },
            FormatKind::ReaderEmbed => Capabilities {
                tabbed: false,
                boilerplate: true,
                original: true,
                disclaimers: true,
            },
        }
    }

    /// Conventional output file name.
    pub fn file_name(self) -> &'static str {
        match self {
            FormatKind::Markdown => "markdown.md",
            FormatKind::PlainMarkdown => "plain_markdown.md",
            FormatKind::Plaintext => "plaintext.txt",
            FormatKind::ReaderEmbed => "reader_embed.md",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FormatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::UnknownFormatSelector(s.to_string()))
    }
}

/// One format, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatSelector {
    Only(FormatKind),
    #[default]
    All,
}

impl FormatSelector {
    pub const ALL_KEYWORD: &'static str = "all";

    pub fn formats(self) -> Vec<FormatKind> {
        match self {
            FormatSelector::Only(kind) => vec![kind],
            FormatSelector::All => FormatKind::ALL.to_vec(),
        }
    }
}

impl FromStr for FormatSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_KEYWORD) {
            return Ok(FormatSelector::All);
        }
        s.parse().map(FormatSelector::Only)
    }
}

impl TryFrom<String> for FormatSelector {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatSelector> for String {
    fn from(selector: FormatSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for FormatSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSelector::Only(kind) => f.write_str(kind.as_str()),
            FormatSelector::All => f.write_str(Self::ALL_KEYWORD),
        }
    }
}
