//! # Parsing
//!
//! Fragment text goes through three stages:
//!
//! 1. [`scan`]: line classification into a flat token stream
//! 2. [`tree`]: structural parse into IR nodes plus a reference table
//! 3. [`inline`]: inline parse of paragraph, heading and footnote text
//!
//! [`parse_fragment`] runs all three and is the only entry point the rest of
//! the engine uses.

mod annotations;
pub mod inline;
pub mod rope;
pub mod scan;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod tests;

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use crate::{
    error::Result,
    fragment::{Provenance, SourceFragment},
    ir::Node,
    references::ReferenceTable,
};

/// The IR of one fragment together with the definitions it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFragment {
    pub origin: Provenance,
    pub nodes: Vec<Node>,
    pub references: ReferenceTable,
}

/// Scans and parses one fragment, failing on the first structural error.
pub fn parse_fragment(fragment: &SourceFragment) -> Result<ParsedFragment> {
    parse_text(fragment.provenance(), fragment.raw_text())
}

/// Parses arbitrary text, failing on the first structural error.
pub fn parse_text(origin: Provenance, text: &str) -> Result<ParsedFragment> {
    let mut builder = tree::TreeBuilder::new(origin);
    for token in scan::scan(text) {
        builder.push(token)?;
    }
    let (nodes, references) = builder.finish()?;
    Ok(parsed(origin, nodes, references))
}

/// Parses any text at all. Malformed nesting is closed where it ends, stray
/// closes are ignored and the first of duplicate definitions wins.
pub fn parse_lenient(origin: Provenance, text: &str) -> ParsedFragment {
    let mut builder = tree::TreeBuilder::new(origin);
    for token in scan::scan(text) {
        builder.recover(token);
    }
    let (nodes, references) = builder.finish_lenient();
    parsed(origin, nodes, references)
}

fn parsed(origin: Provenance, nodes: Vec<Node>, references: ReferenceTable) -> ParsedFragment {
    log::trace!(
        "parsed {origin}: {} nodes, {} definitions",
        nodes.len(),
        references.len()
    );
    ParsedFragment {
        origin,
        nodes,
        references,
    }
}

/// Replaces every `{{ year }}` placeholder (any inner spacing) with `year`.
pub fn replace_year<'a>(text: &'a str, year: &str) -> Cow<'a, str> {
    static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = YEAR_REGEX
        .get_or_init(|| Regex::new(r"\{\{\s*year\s*\}\}").expect("Invalid year regex"));
    re.replace_all(text, regex::NoExpand(year))
}
