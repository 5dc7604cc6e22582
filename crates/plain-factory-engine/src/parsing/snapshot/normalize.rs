use serde::Serialize;

use crate::{
    ir::{AdmonitionStyle, EmphasisStyle, Inline, LinkTarget, Node},
    parsing::ParsedFragment,
    references::DefinitionKind,
};

/// Line-free structural view of a parsed fragment.
///
/// Source line numbers differ between a fragment and its re-rendered form, so
/// they are left out; everything else that a renderer could observe is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
    pub definitions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub inline: Vec<String>,
    pub children: Vec<BlockSnap>,
}

pub fn normalize(parsed: &ParsedFragment) -> Snap {
    // Renderers may regroup definitions; only the set matters.
    let mut definitions: Vec<String> = parsed
        .references
        .iter()
        .map(|def| match &def.kind {
            DefinitionKind::Footnote { content } => {
                format!("footnote {} = {}", def.id, inline_summary(content).join(" "))
            }
            DefinitionKind::Link { url, title } => {
                format!("link {} = {url} {title:?}", def.id)
            }
            DefinitionKind::Abbreviation { text } => format!("abbr {} = {text}", def.id),
        })
        .collect();
    definitions.sort();

    Snap {
        blocks: parsed.nodes.iter().map(block).collect(),
        definitions,
    }
}

fn block(node: &Node) -> BlockSnap {
    let leaf = |kind: String, inline: Vec<String>| BlockSnap {
        kind,
        inline,
        children: vec![],
    };
    match node {
        Node::Paragraph { content, .. } => leaf("Paragraph".into(), inline_summary(content)),
        Node::Heading { level, content, .. } => {
            leaf(format!("Heading({level})"), inline_summary(content))
        }
        Node::Admonition(a) => {
            let style = match a.style {
                AdmonitionStyle::Static => "static",
                AdmonitionStyle::Collapsible { open: true } => "open",
                AdmonitionStyle::Collapsible { open: false } => "closed",
            };
            BlockSnap {
                kind: format!("Admonition({}, {style}, {:?})", a.tone, a.title),
                inline: vec![],
                children: a.children.iter().map(block).collect(),
            }
        }
        Node::TabGroup(g) => BlockSnap {
            kind: "TabGroup".into(),
            inline: vec![],
            children: g
                .panels
                .iter()
                .map(|p| BlockSnap {
                    kind: format!("Tab({})", p.label),
                    inline: vec![],
                    children: p.children.iter().map(block).collect(),
                })
                .collect(),
        },
        Node::Quote(children) => BlockSnap {
            kind: "Quote".into(),
            inline: vec![],
            children: children.iter().map(block).collect(),
        },
        Node::CodeBlock { fence, info, body } => {
            leaf(format!("Code({fence}{info})"), vec![body.clone()])
        }
        Node::RawHtml(html) => leaf("RawHtml".into(), vec![html.clone()]),
        Node::Rule => leaf("Rule".into(), vec![]),
        Node::Label { level, text } => leaf(format!("Label(h{level})"), vec![text.clone()]),
    }
}

fn inline_summary(inlines: &[Inline]) -> Vec<String> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) => format!("Text({s})"),
            Inline::SoftBreak => "SoftBreak".into(),
            Inline::Code(s) => format!("Code({s})"),
            Inline::Emphasis {
                style,
                marker,
                children,
            } => {
                let style = match style {
                    EmphasisStyle::Emphasis => "Em",
                    EmphasisStyle::Strong => "Strong",
                    EmphasisStyle::Mark => "Mark",
                };
                format!("{style}[{marker}]({})", inline_summary(children).join(" "))
            }
            Inline::Link { text, target } => {
                let target = match target {
                    LinkTarget::Inline { url, title } => format!("{url} {title:?}"),
                    LinkTarget::Reference(id) => format!("ref {id}"),
                };
                format!("Link({} -> {target})", inline_summary(text).join(" "))
            }
            Inline::FootnoteRef(id) => format!("FootnoteRef({id})"),
            Inline::Html(s) => format!("Html({s})"),
            Inline::Attributes(s) => format!("Attributes({s})"),
            Inline::Marker(s) => format!("Marker({s})"),
            Inline::Annotation {
                marker, content, ..
            } => format!("Annotation{marker}({})", inline_summary(content).join(" ")),
        })
        .collect()
}
