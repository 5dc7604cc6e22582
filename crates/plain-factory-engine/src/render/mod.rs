//! # Rendering
//!
//! One [`Renderer`] per [`FormatKind`]. Renderers are total: once a document
//! has been assembled and its references resolved, rendering cannot fail.

mod markdown;
mod plain_markdown;
mod plaintext;
mod reader;

pub use markdown::MarkdownRenderer;
pub use plain_markdown::PlainMarkdownRenderer;
pub use plaintext::{MARKUP_SENTINELS, PlaintextRenderer, strip_nodes};
pub use reader::ReaderRenderer;

use crate::{assembly::AssembledDocument, format::FormatKind};

pub trait Renderer: Send + Sync {
    fn format(&self) -> FormatKind;
    fn render(&self, doc: &AssembledDocument) -> String;
}

pub fn renderer_for(format: FormatKind) -> Box<dyn Renderer> {
    match format {
        FormatKind::Markdown => Box::new(MarkdownRenderer),
        FormatKind::PlainMarkdown => Box::new(PlainMarkdownRenderer),
        FormatKind::Plaintext => Box::new(PlaintextRenderer),
        FormatKind::ReaderEmbed => Box::new(ReaderRenderer),
    }
}

/// A finished text blob for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub format: FormatKind,
    pub text: String,
}

impl RenderedOutput {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }
}

/// Renders `doc` in the format it was assembled for.
pub fn render(doc: &AssembledDocument) -> RenderedOutput {
    let format = doc.format();
    let text = renderer_for(format).render(doc);
    log::debug!("rendered {format}: {} bytes", text.len());
    RenderedOutput { format, text }
}

/// Joins rendered blocks with one blank line, skipping empty ones.
pub(crate) fn join_blocks(blocks: impl IntoIterator<Item = String>) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prefixes every non-blank line of `text`.
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns `text` into a block quote; blank lines keep a bare `>`.
pub(crate) fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ends non-empty output with exactly one newline.
pub(crate) fn finish(text: String) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
