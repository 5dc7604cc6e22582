/// Blockquote prefix knowledge.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips one blockquote prefix (up to three spaces, `>`, one optional
    /// space) and returns the byte offset where the content begins.
    pub fn strip_one(s: &str) -> Option<usize> {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < b.len() && i < 3 && b[i] == b' ' {
            i += 1;
        }
        if b.get(i) != Some(&(Self::PREFIX as u8)) {
            return None;
        }
        i += 1;
        if b.get(i) == Some(&b' ') {
            i += 1;
        }
        Some(i)
    }
}
