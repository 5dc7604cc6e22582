/// Inline HTML knowledge.
pub struct InlineHtml;

impl InlineHtml {
    pub const OPEN: u8 = b'<';
    pub const COMMENT_OPEN: &'static str = "<!--";
    pub const COMMENT_CLOSE: &'static str = "-->";

    /// Elements that never have a closing tag.
    pub const VOID: &'static [&'static str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];

    pub fn is_void(name: &str) -> bool {
        Self::VOID.iter().any(|v| v.eq_ignore_ascii_case(name))
    }
}
