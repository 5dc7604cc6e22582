//! Parser-level tests over whole fragments.

use crate::{
    error::Error,
    fragment::{Provenance, SourceFragment},
    ir::{Inline, Node},
    parsing::{parse_fragment, parse_lenient, parse_text, replace_year, scan::scan, snapshot},
};

const LICENSE_BODY: &str = r#"# Plain MIT License

You can use this work **any way you want**[^use].

!!! tip "In short"

    === "You can"

        - copy it
        - change it

    === "You must"

        Keep this notice.

/// warning | Liability
    type: danger

We are not liable for anything.[^liab]

> Quoted from the [official text][mit].

///

```text
!!! not an admonition
```

<div class="license-meta">
Published {{ year }}
</div>

[^use]: Including commercial use.
[^liab]: As far as the law allows.
[mit]: https://opensource.org/license/mit "MIT"
"#;

#[test]
fn token_spans_tile_a_realistic_fragment() {
    let tokens = scan(LICENSE_BODY);
    snapshot::invariants(LICENSE_BODY, &tokens);
}

#[test]
fn token_spans_tile_with_crlf_and_no_trailing_newline() {
    let src = "para\r\n\r\n!!! note\r\n    inside\r\nend";
    snapshot::invariants(src, &scan(src));
}

#[test]
fn realistic_fragment_parses_into_a_tree() {
    let parsed = parse_fragment(&SourceFragment::new(Provenance::Body, LICENSE_BODY)).unwrap();

    let kinds: Vec<&str> = parsed
        .nodes
        .iter()
        .map(|n| match n {
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::Admonition(_) => "admonition",
            Node::CodeBlock { .. } => "code",
            Node::RawHtml(_) => "html",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "admonition", "admonition", "code", "html"]
    );
    assert_eq!(parsed.references.len(), 3);

    let Node::Admonition(warning) = &parsed.nodes[3] else {
        panic!("expected the liability admonition");
    };
    assert_eq!(warning.tone, "danger");
    assert!(matches!(warning.children.last(), Some(Node::Quote(_))));
}

#[test]
fn year_placeholder_is_replaced_before_scanning() {
    assert_eq!(replace_year("(c) {{ year }} and {{year}}", "2026"), "(c) 2026 and 2026");
    assert_eq!(replace_year("no placeholder", "2026"), "no placeholder");
}

#[test]
fn raw_zones_suppress_inline_parsing() {
    let parsed = parse_fragment(&SourceFragment::new(Provenance::Body, "`[^x]`")).unwrap();
    assert_eq!(
        parsed.nodes,
        vec![Node::Paragraph {
            line: 1,
            content: vec![Inline::Code("[^x]".into())],
        }]
    );
}

#[test]
fn empty_fragment() {
    let parsed = parse_fragment(&SourceFragment::new(Provenance::Outro, "")).unwrap();
    assert!(parsed.nodes.is_empty());
    assert!(parsed.references.is_empty());
}

#[test]
fn blank_lines_only() {
    let parsed = parse_fragment(&SourceFragment::new(Provenance::Outro, "\n\n\n")).unwrap();
    assert!(parsed.nodes.is_empty());
}

#[test]
fn errors_carry_the_fragment_provenance() {
    let err = parse_fragment(&SourceFragment::new(
        Provenance::Interpretation,
        "text\n\n/// note\nnever closed\n",
    ))
    .unwrap_err();
    assert_eq!(err.to_string(), "interpretation:3: admonition is never closed");
    assert!(matches!(err, Error::UnterminatedScope { .. }));
}

#[test]
fn lenient_parse_accepts_what_strict_parse_rejects() {
    let src = "///\n[^a]: first\n[^a]: second\n//// note\n/// tip\ninner\n////\nleft open\n/// warning\n";
    assert!(parse_text(Provenance::Original, src).is_err());

    let parsed = parse_lenient(Provenance::Original, src);
    assert_eq!(parsed.references.len(), 1);
    let Some(crate::references::DefinitionKind::Footnote { content }) =
        parsed.references.footnote("a").map(|d| &d.kind)
    else {
        panic!("footnote a should be defined");
    };
    assert_eq!(content, &vec![Inline::Text("first".into())]);
    assert!(matches!(&parsed.nodes[..], [Node::Admonition(_), Node::Paragraph { .. }, Node::Admonition(_)]));
}
