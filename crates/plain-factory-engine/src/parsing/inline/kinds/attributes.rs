/// Attribute lists attached to headings and paragraphs: `{ .class #id }`.
pub struct AttributeList;

impl AttributeList {
    pub const OPEN: u8 = b'{';
    pub const CLOSE: char = '}';

    /// Whether the text between the braces looks like an attribute list.
    pub fn is_attribute_body(inner: &str) -> bool {
        let t = inner.trim_start();
        let t = t.strip_prefix(':').unwrap_or(t).trim_start();
        t.starts_with(['.', '#']) && !inner.contains(['{', '\n'])
    }
}
