//! The full dialect, as consumed by the site renderer.
//!
//! Output re-parses to the IR it was rendered from: every construct is
//! written back with the delimiters the scanner and inline parser recognize.

use std::fmt::Write;

use crate::{
    assembly::AssembledDocument,
    format::FormatKind,
    ir::{Admonition, Inline, LinkTarget, Node, TabGroup},
    parsing::{
        ParsedFragment,
        inline::kinds::CodeSpan,
        scan::kinds::{AdmonitionLine, Definition, TabLine, ThematicBreak},
    },
    references::{DefinitionKind, ReferenceTable},
};

use super::{Renderer, finish, indent, join_blocks};

const CHILD_INDENT: &str = "    ";

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> FormatKind {
        FormatKind::Markdown
    }

    fn render(&self, doc: &AssembledDocument) -> String {
        let nodes: Vec<&Node> = doc.nodes().collect();
        finish(join_blocks([
            blocks(&nodes),
            definitions(doc.references()),
        ]))
    }
}

impl MarkdownRenderer {
    /// Renders a single parsed fragment, definitions included.
    pub fn render_fragment(parsed: &ParsedFragment) -> String {
        let nodes: Vec<&Node> = parsed.nodes.iter().collect();
        finish(join_blocks([
            blocks(&nodes),
            definitions(&parsed.references),
        ]))
    }
}

fn blocks(nodes: &[&Node]) -> String {
    let mut previous: Option<&Node> = None;
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let follows_group = matches!(previous, Some(Node::TabGroup(_)));
        out.push(block(node, follows_group));
        previous = Some(node);
    }
    join_blocks(out)
}

fn child_blocks(children: &[Node]) -> String {
    let refs: Vec<&Node> = children.iter().collect();
    blocks(&refs)
}

fn block(node: &Node, follows_group: bool) -> String {
    match node {
        Node::Paragraph { content, .. } => join_blocks([inlines(content), annotation_list(content)]),
        Node::Heading { level, content, .. } => {
            format!("{} {}", "#".repeat(usize::from(*level)), inlines(content))
                .trim_end()
                .to_string()
        }
        Node::Admonition(admonition) => admonition_block(admonition),
        Node::TabGroup(group) => tab_group(group, follows_group),
        Node::Quote(children) => super::quote(&child_blocks(children)),
        Node::CodeBlock { fence, info, body } => {
            if body.is_empty() {
                format!("{fence}{info}\n{fence}")
            } else {
                format!("{fence}{info}\n{body}\n{fence}")
            }
        }
        Node::RawHtml(html) => html.clone(),
        Node::Rule => ThematicBreak::CANONICAL.to_string(),
        Node::Label { level, text } => format!("{} {text}", "#".repeat(usize::from(*level))),
    }
}

fn admonition_block(admonition: &Admonition) -> String {
    let mut head = format!(
        "{} {}",
        AdmonitionLine::marker(admonition.style),
        admonition.tone
    );
    if let Some(title) = &admonition.title {
        let _ = write!(head, " \"{title}\"");
    }
    let body = child_blocks(&admonition.children);
    if body.is_empty() {
        head
    } else {
        format!("{head}\n\n{}", indent(&body, CHILD_INDENT))
    }
}

fn tab_group(group: &TabGroup, follows_group: bool) -> String {
    let panels = group.panels.iter().enumerate().map(|(i, panel)| {
        let head = format!(
            "{} \"{}\"",
            TabLine::marker(i == 0 && follows_group),
            panel.label
        );
        let body = child_blocks(&panel.children);
        if body.is_empty() {
            head
        } else {
            format!("{head}\n\n{}", indent(&body, CHILD_INDENT))
        }
    });
    join_blocks(panels)
}

/// Inline content in the dialect, references left unresolved.
pub(crate) fn inlines(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::SoftBreak => out.push('\n'),
            Inline::Code(code) => out.push_str(&CodeSpan::render(code)),
            Inline::Emphasis {
                style,
                marker,
                children,
            } => {
                let delimiter = marker.to_string().repeat(style.width());
                let _ = write!(out, "{delimiter}{}{delimiter}", inlines(children));
            }
            Inline::Link { text, target } => {
                let _ = write!(out, "[{}]", inlines(text));
                match target {
                    LinkTarget::Inline { url, title } => out.push_str(&destination(url, title.as_deref())),
                    LinkTarget::Reference(id) => {
                        let _ = write!(out, "[{id}]");
                    }
                }
            }
            Inline::FootnoteRef(id) => {
                let _ = write!(out, "[^{id}]");
            }
            Inline::Html(html)
            | Inline::Attributes(html)
            | Inline::Marker(html)
            | Inline::Annotation { marker: html, .. } => out.push_str(html),
        }
    }
    out
}

/// The ordered list holding the text of a paragraph's annotations.
fn annotation_list(content: &[Inline]) -> String {
    content
        .iter()
        .filter_map(|inline| match inline {
            Inline::Annotation {
                marker, content, ..
            } => {
                let number = marker.trim_start_matches('(').trim_end_matches(')');
                Some(format!("{number}. {}", inlines(content)))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn destination(url: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("({url} \"{title}\")"),
        None => format!("({url})"),
    }
}

/// Footnote, link and abbreviation definitions, each group in definition
/// order.
fn definitions(table: &ReferenceTable) -> String {
    let footnotes = table.footnotes().filter_map(|def| match &def.kind {
        DefinitionKind::Footnote { content } => Some(footnote_definition(&def.id, content)),
        _ => None,
    });
    let links = table.links().filter_map(|def| match &def.kind {
        DefinitionKind::Link { url, title } => Some(match title {
            Some(title) => format!("[{}]: {url} \"{title}\"", def.id),
            None => format!("[{}]: {url}", def.id),
        }),
        _ => None,
    });
    join_blocks([
        footnotes.collect::<Vec<_>>().join("\n"),
        links.collect::<Vec<_>>().join("\n"),
        abbreviations(table),
    ])
}

pub(crate) fn abbreviations(table: &ReferenceTable) -> String {
    table
        .abbreviations()
        .filter_map(|def| match &def.kind {
            DefinitionKind::Abbreviation { text } => Some(format!("*[{}]: {text}", def.id)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn footnote_definition(id: &str, content: &[Inline]) -> String {
    let continuation = format!("\n{}", " ".repeat(Definition::CONTINUATION_INDENT));
    let text = inlines(content).replace('\n', &continuation);
    format!("[^{id}]: {text}").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fragment::Provenance,
        parsing::{parse_text, snapshot::normalize},
    };
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> ParsedFragment {
        parse_text(Provenance::Body, src).unwrap()
    }

    fn round_trip(src: &str) {
        let first = parse(src);
        let rendered = MarkdownRenderer::render_fragment(&first);
        let second = parse(&rendered);
        assert_eq!(normalize(&first), normalize(&second), "rendered:\n{rendered}");
    }

    #[test]
    fn nested_scopes_are_reindented() {
        let src = "=== \"Plain\"\n    !!! tip \"Short\"\n        Keep it.\n";
        let rendered = MarkdownRenderer::render_fragment(&parse(src));
        assert_snapshot!(rendered, @r#"
        === "Plain"

            !!! tip "Short"

                Keep it.
        "#);
    }

    #[test]
    fn second_group_gets_the_new_group_marker() {
        let src = "=== \"A\"\n    a\n\n===! \"B\"\n    b\n";
        let rendered = MarkdownRenderer::render_fragment(&parse(src));
        assert!(rendered.contains("===! \"B\""), "{rendered}");
        round_trip(src);
    }

    #[test]
    fn definitions_move_to_the_end() {
        let src = "[site]: https://plainlicense.org \"Home\"\n[^n]: First line\n    second line\n\nSee [us][site][^n].\n";
        let rendered = MarkdownRenderer::render_fragment(&parse(src));
        assert_eq!(
            rendered,
            "See [us][site][^n].\n\n[^n]: First line\n    second line\n\n[site]: https://plainlicense.org \"Home\"\n"
        );
        round_trip(src);
    }

    #[test]
    fn round_trips_a_license_body() {
        round_trip(
            "# Plain License\n\nYou **can** use this *work*[^1] in `any` way.\n\n\
             !!! note \"Interpreting\"\n\n    Read it ==plainly==.\n\n    > Quoted\n    > twice\n\n\
             ??? danger\n\n    Careful.\n\n\
             /// details | More\n    open: true\n\nHidden [text](https://x.org \"t\").\n///\n\n\
             ```text\nraw [^1] **not bold**\n\n```\n\n\
             <div class=\"x\">\nblock\n</div>\n\n---\n\n- one\n- two { .list }\n\n\
             [^1]: A footnote.\n",
        );
    }

    #[test]
    fn abbreviations_come_last() {
        let src = "*[SPDX]: Software Package Data Exchange\n[^n]: Note.\n\nSPDX[^n].\n";
        let rendered = MarkdownRenderer::render_fragment(&parse(src));
        assert_eq!(
            rendered,
            "SPDX[^n].\n\n[^n]: Note.\n\n*[SPDX]: Software Package Data Exchange\n"
        );
        round_trip(src);
    }

    #[test]
    fn annotation_list_follows_its_paragraph() {
        let src = "Share (1) and sell (2).\n{ .annotate }\n\n1. Copies.\n2. For *money*.\n\nAfter.\n";
        let rendered = MarkdownRenderer::render_fragment(&parse(src));
        assert_eq!(rendered, src);
        round_trip(src);
    }

    #[test]
    fn empty_admonition_and_fence() {
        round_trip("!!! note \"\"\n\n```\n```\n");
    }
}
