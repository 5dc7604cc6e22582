use crate::ir::{Inline, LinkTarget};

use super::{
    cursor::Cursor,
    kinds::{AttributeList, CodeSpan, EmphasisRun, InlineHtml, LinkSyntax},
};

type TryParse = fn(&mut Cursor<'_>) -> Option<Inline>;

/// Constructs tried at every position, in precedence order. Code spans come
/// first so that nothing inside them is interpreted.
const PARSERS: &[TryParse] = &[
    try_parse_code_span,
    try_parse_html,
    try_parse_footnote_ref,
    try_parse_link,
    try_parse_attributes,
    try_parse_emphasis,
];

/// Parses inline content into a sequence of [`Inline`]s.
///
/// `s` is the text of one paragraph, heading or footnote definition with its
/// lines joined by `\n`; every line break becomes [`Inline::SoftBreak`].
/// Text between constructs is emitted as [`Inline::Text`].
pub fn parse_inline(s: &str) -> Vec<Inline> {
    parse_with(s, true)
}

/// Parses content nested inside another construct (emphasis, link text).
fn parse_nested(s: &str) -> Vec<Inline> {
    parse_with(s, false)
}

fn parse_with(s: &str, starts_line: bool) -> Vec<Inline> {
    let mut cur = Cursor::new(s, starts_line);
    let mut out = vec![];
    let mut text_start = cur.pos();
    // A numbered line only starts an item on the first line, inside a list,
    // or when it counts from 1.
    let mut first_line = true;
    let mut in_list = false;

    fn flush_text(out: &mut Vec<Inline>, text: &str) {
        if !text.is_empty() {
            out.push(Inline::Text(text.to_string()));
        }
    }

    while !cur.eof() {
        let start = cur.pos();

        if cur.peek() == Some(b'\n') {
            flush_text(&mut out, &s[text_start..start]);
            out.push(Inline::SoftBreak);
            cur.bump();
            text_start = cur.pos();
            first_line = false;
            continue;
        }

        let marker = if cur.at_line_start() {
            try_parse_marker(&mut cur, first_line || in_list)
        } else {
            None
        };
        in_list |= marker.is_some();
        if let Some(node) = marker.or_else(|| PARSERS.iter().find_map(|parse| parse(&mut cur))) {
            flush_text(&mut out, &s[text_start..start]);
            out.push(node);
            text_start = cur.pos();
            continue;
        }

        cur.bump_char();
    }

    flush_text(&mut out, &s[text_start..]);
    out
}

/// List or definition marker at the start of a line, with its indentation
/// and trailing spaces: `- `, `* `, `+ `, `12. `, `3) `, `:   `. Unless
/// `any_number`, an ordered marker must be `1.` or `1)`.
fn try_parse_marker(cur: &mut Cursor<'_>, any_number: bool) -> Option<Inline> {
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_while(|b| b == b' ');

    let ok = match cur.peek() {
        Some(b'-' | b'*' | b'+' | b':') => {
            cur.bump();
            true
        }
        Some(b'0'..=b'9') => {
            let digits_start = cur.pos();
            let digits = cur.bump_while(|b| b.is_ascii_digit());
            let number = cur.since(digits_start);
            digits <= 9
                && (any_number || number == "1")
                && matches!(cur.bump(), Some(b'.' | b')'))
        }
        _ => false,
    };

    if !ok || cur.peek() != Some(b' ') {
        *cur = saved;
        return None;
    }
    cur.bump_while(|b| b == b' ');
    Some(Inline::Marker(cur.since(start).to_string()))
}

/// Attempts to parse a code span starting at the current position.
///
/// The closing run must have exactly as many backticks as the opening one.
/// Returns `None` (cursor restored) if the span isn't closed.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(CodeSpan::TICK) || cur.prev() == Some(CodeSpan::TICK) {
        return None;
    }
    let saved = cur.clone();
    let open = cur.bump_while(|b| b == CodeSpan::TICK);
    let inner_start = cur.pos();

    loop {
        let rest = cur.rest();
        let Some(offset) = rest.find(CodeSpan::TICK as char) else {
            *cur = saved;
            return None;
        };
        cur.bump_n(offset);
        let inner_end = cur.pos();
        let run = cur.bump_while(|b| b == CodeSpan::TICK);
        if run == open {
            let inner = &cur.s[inner_start..inner_end];
            return Some(Inline::Code(CodeSpan::trim_padding(inner).to_string()));
        }
    }
}

/// Inline HTML: a comment, a closing tag, a void or self-closing tag, or an
/// element taken whole up to its first matching close tag.
fn try_parse_html(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(InlineHtml::OPEN) {
        return None;
    }
    let rest = cur.rest();

    if rest.starts_with(InlineHtml::COMMENT_OPEN) {
        let end = rest.find(InlineHtml::COMMENT_CLOSE)? + InlineHtml::COMMENT_CLOSE.len();
        cur.bump_n(end);
        return Some(Inline::Html(rest[..end].to_string()));
    }

    let bytes = rest.as_bytes();
    let closing = bytes.get(1) == Some(&b'/');
    let name_start = if closing { 2 } else { 1 };
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let name_len = bytes[name_start..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-')
        .count();
    let name = &rest[name_start..name_start + name_len];
    match bytes.get(name_start + name_len) {
        Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
        _ => return None,
    }

    let tag_end = rest.find('>')? + 1;
    let tag = &rest[..tag_end];
    if closing || tag.ends_with("/>") || InlineHtml::is_void(name) {
        cur.bump_n(tag_end);
        return Some(Inline::Html(tag.to_string()));
    }

    let close_tag = format!("</{name}>");
    let end = rest[tag_end..]
        .find(&close_tag)
        .map_or(tag_end, |at| tag_end + at + close_tag.len());
    cur.bump_n(end);
    Some(Inline::Html(rest[..end].to_string()))
}

/// A footnote use: `[^id]`.
fn try_parse_footnote_ref(cur: &mut Cursor<'_>) -> Option<Inline> {
    if !cur.starts_with(LinkSyntax::FOOTNOTE_OPEN) {
        return None;
    }
    let rest = cur.rest();
    let close = rest.find(LinkSyntax::CLOSE as char)?;
    let id = &rest[LinkSyntax::FOOTNOTE_OPEN.len()..close];
    if !LinkSyntax::is_footnote_id(id) {
        return None;
    }
    cur.bump_n(close + 1);
    Some(Inline::FootnoteRef(id.to_string()))
}

/// `[text](url "title")`, `[text][id]` or the collapsed `[text][]`.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(LinkSyntax::OPEN) {
        return None;
    }
    let rest = cur.rest();
    let text_end = matching_bracket(rest)?;
    let text = &rest[1..text_end];
    let after = &rest[text_end + 1..];

    let (target, consumed) = match after.as_bytes().first() {
        Some(&LinkSyntax::DEST_OPEN) => {
            let close = after.find(LinkSyntax::DEST_CLOSE as char)?;
            let (url, title) = LinkSyntax::split_destination(&after[1..close]);
            let target = LinkTarget::Inline {
                url: url.to_string(),
                title: title.map(str::to_string),
            };
            (target, close + 1)
        }
        Some(&LinkSyntax::OPEN) => {
            let close = after.find(LinkSyntax::CLOSE as char)?;
            let id = &after[1..close];
            if id.contains('\n') {
                return None;
            }
            let id = if id.is_empty() { text } else { id };
            (LinkTarget::Reference(id.to_string()), close + 1)
        }
        _ => return None,
    };

    cur.bump_n(text_end + 1 + consumed);
    Some(Inline::Link {
        text: parse_nested(text),
        target,
    })
}

/// Index of the `]` matching the `[` at the start of `s`.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            LinkSyntax::OPEN => depth += 1,
            LinkSyntax::CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `{ .class #id }` attribute lists.
fn try_parse_attributes(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(AttributeList::OPEN) {
        return None;
    }
    let rest = cur.rest();
    let close = rest.find(AttributeList::CLOSE)?;
    if !AttributeList::is_attribute_body(&rest[1..close]) {
        return None;
    }
    cur.bump_n(close + 1);
    Some(Inline::Attributes(rest[..=close].to_string()))
}

/// Emphasis, strong and mark. The closing run must match the opening run's
/// character and length, and must not follow whitespace.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<Inline> {
    let ch = cur.peek()?;
    if !EmphasisRun::is_delimiter(ch) || cur.prev() == Some(ch) {
        return None;
    }
    if ch == EmphasisRun::UNDERSCORE && cur.prev().is_some_and(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let saved = cur.clone();
    let open = cur.bump_while(|b| b == ch);
    let Some(style) = EmphasisRun::style(ch, open) else {
        *cur = saved;
        return None;
    };
    if cur.peek().is_none_or(|b| b.is_ascii_whitespace()) {
        *cur = saved;
        return None;
    }

    let inner_start = cur.pos();
    loop {
        let Some(offset) = cur.rest().find(ch as char) else {
            *cur = saved;
            return None;
        };
        cur.bump_n(offset);
        let inner_end = cur.pos();
        let before = cur.prev();
        let run = cur.bump_while(|b| b == ch);
        let after = cur.peek();

        let closes = run == open
            && inner_end > inner_start
            && before.is_some_and(|b| !b.is_ascii_whitespace())
            && !(ch == EmphasisRun::UNDERSCORE && after.is_some_and(|b| b.is_ascii_alphanumeric()));
        if closes {
            return Some(Inline::Emphasis {
                style,
                marker: ch as char,
                children: parse_nested(&cur.s[inner_start..inner_end]),
            });
        }
    }
}
