/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Writes `content` as a code span that re-parses to the same content.
    pub fn render(content: &str) -> String {
        let longest = content
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let ticks = "`".repeat(longest + 1);
        let pad = !content.trim().is_empty()
            && (content.starts_with([' ', '`']) || content.ends_with([' ', '`']));
        if pad {
            format!("{ticks} {content} {ticks}")
        } else {
            format!("{ticks}{content}{ticks}")
        }
    }

    /// Strips one space on each side when both are present.
    pub fn trim_padding(inner: &str) -> &str {
        if inner.len() >= 2
            && inner.starts_with(' ')
            && inner.ends_with(' ')
            && !inner.trim().is_empty()
        {
            &inner[1..inner.len() - 1]
        } else {
            inner
        }
    }
}
