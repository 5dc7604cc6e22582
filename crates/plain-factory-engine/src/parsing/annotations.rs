//! Annotated paragraphs.
//!
//! A paragraph carrying the `.annotate` class cites `(1)`, `(2)`, ... and the
//! ordered list directly after it holds the text of each annotation:
//!
//! ```text
//! You may share the work (1).
//! { .annotate }
//!
//! 1. Sharing includes selling.
//! ```
//!
//! The list is folded into the paragraph as [`Inline::Annotation`]s, so the
//! text travels with its citation.

use crate::ir::Inline;

pub const CLASS: &str = ".annotate";

/// Whether `content` carries an attribute list with the annotate class.
pub fn is_annotated(content: &[Inline]) -> bool {
    content.iter().any(|inline| match inline {
        Inline::Attributes(attrs) => attrs
            .trim_start_matches('{')
            .trim_end_matches('}')
            .split_whitespace()
            .any(|word| word == CLASS),
        _ => false,
    })
}

/// Splits a paragraph that is nothing but an ordered list into its items, as
/// `(number, content)`. Lines without a marker continue the previous item.
pub fn list_items(content: &[Inline]) -> Option<Vec<(String, Vec<Inline>)>> {
    let mut items: Vec<(String, Vec<Inline>)> = Vec::new();
    for inline in content {
        if let Some(number) = ordered_number(inline) {
            if let Some((_, last)) = items.last_mut()
                && last.last() == Some(&Inline::SoftBreak)
            {
                last.pop();
            }
            items.push((number.to_string(), Vec::new()));
            continue;
        }
        let (_, item) = items.last_mut()?;
        item.push(inline.clone());
    }

    let mut numbers: Vec<&str> = items.iter().map(|(n, _)| n.as_str()).collect();
    numbers.sort_unstable();
    numbers.dedup();
    (!items.is_empty() && numbers.len() == items.len()).then_some(items)
}

/// Replaces the first `(N)` of every item in the top-level text of `content`
/// with an annotation holding that item. Leaves `content` untouched and
/// returns false when some item is never cited.
pub fn cite(content: &mut Vec<Inline>, items: Vec<(String, Vec<Inline>)>, id_prefix: &str) -> bool {
    let cited = |content: &[Inline], marker: &str| {
        content
            .iter()
            .any(|inline| matches!(inline, Inline::Text(text) if text.contains(marker)))
    };
    if !items.iter().all(|(number, _)| cited(content, &format!("({number})"))) {
        return false;
    }

    for (number, text) in items {
        let marker = format!("({number})");
        let Some((index, offset)) = content.iter().enumerate().find_map(|(i, inline)| match inline {
            Inline::Text(text) => text.find(&marker).map(|at| (i, at)),
            _ => None,
        }) else {
            continue;
        };
        let Inline::Text(whole) = content.remove(index) else {
            continue;
        };
        let (before, after) = (&whole[..offset], &whole[offset + marker.len()..]);

        let mut pieces = Vec::with_capacity(3);
        if !before.is_empty() {
            pieces.push(Inline::Text(before.to_string()));
        }
        pieces.push(Inline::Annotation {
            id: format!("{id_prefix}:{number}"),
            marker,
            content: text,
        });
        if !after.is_empty() {
            pieces.push(Inline::Text(after.to_string()));
        }
        content.splice(index..index, pieces);
    }
    true
}

/// The number of an ordered list marker such as `2. ` or `3) `.
fn ordered_number(inline: &Inline) -> Option<&str> {
    let Inline::Marker(marker) = inline else {
        return None;
    };
    let number = marker
        .trim()
        .strip_suffix('.')
        .or_else(|| marker.trim().strip_suffix(')'))?;
    (!number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::parse_inline;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn annotate_class_is_found_among_others() {
        assert!(is_annotated(&parse_inline("Text\n{ .lead .annotate }")));
        assert!(is_annotated(&parse_inline("Text\n{.annotate}")));
        assert!(!is_annotated(&parse_inline("Text\n{ .annotated }")));
    }

    #[test]
    fn list_items_keep_continuation_lines() {
        let items = list_items(&parse_inline("1. First note\n   goes on.\n2. Second.")).unwrap();
        assert_eq!(
            items,
            vec![
                (
                    "1".to_string(),
                    vec![text("First note"), Inline::SoftBreak, text("   goes on.")]
                ),
                ("2".to_string(), vec![text("Second.")]),
            ]
        );
    }

    #[test]
    fn text_before_the_first_marker_is_not_a_list() {
        assert_eq!(list_items(&parse_inline("Intro\n1. item")), None);
        assert_eq!(list_items(&parse_inline("- bullet")), None);
        assert_eq!(list_items(&parse_inline("1. a\n1. b")), None);
    }

    #[test]
    fn citations_become_annotations() {
        let mut content = parse_inline("Share (1) and sell (2).\n{ .annotate }");
        let items = list_items(&parse_inline("1. Copies.\n2. For money.")).unwrap();

        assert!(cite(&mut content, items, "body:1"));
        assert_eq!(
            content,
            vec![
                text("Share "),
                Inline::Annotation {
                    marker: "(1)".into(),
                    id: "body:1:1".into(),
                    content: vec![text("Copies.")],
                },
                text(" and sell "),
                Inline::Annotation {
                    marker: "(2)".into(),
                    id: "body:1:2".into(),
                    content: vec![text("For money.")],
                },
                text("."),
                Inline::SoftBreak,
                Inline::Attributes("{ .annotate }".into()),
            ]
        );
    }

    #[test]
    fn uncited_item_leaves_the_paragraph_alone() {
        let mut content = parse_inline("Share (1).\n{ .annotate }");
        let before = content.clone();
        let items = list_items(&parse_inline("1. Copies.\n2. Orphan.")).unwrap();

        assert!(!cite(&mut content, items, "body:1"));
        assert_eq!(content, before);
    }
}
