use xi_rope::Rope;

use super::span::Span;

/// A single physical line of a fragment with its byte span and 1-based number.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 1-based line number within the fragment.
    pub number: usize,
    /// Byte span of this line (includes the newline if present).
    pub span: Span,
    /// The line text including its line ending.
    pub text: String,
}

impl LineRef {
    /// The line text without its trailing `\n` / `\r\n`.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which keeps the spans
/// contiguous: the union of all yielded spans is `0..rope.len()`.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(move |(idx, line)| {
            let start = offset;
            offset += line.len();
            LineRef {
                number: idx + 1,
                span: Span { start, end: offset },
                text: line.into_owned(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_contiguous_and_numbered() {
        let rope = Rope::from("one\ntwo\r\nthree");
        let lines: Vec<_> = lines_with_spans(&rope).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].span, Span::new(0, 4));
        assert_eq!(lines[1].span, Span::new(4, 9));
        assert_eq!(lines[1].content(), "two");
        assert_eq!(lines[2].span, Span::new(9, 14));
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn empty_rope_has_no_lines() {
        let rope = Rope::from("");
        assert_eq!(lines_with_spans(&rope).count(), 0);
    }
}
