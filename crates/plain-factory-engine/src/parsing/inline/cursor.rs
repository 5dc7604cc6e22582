/// A cursor for byte-wise inline parsing with cheap backtracking.
///
/// Parsers clone the cursor before a speculative match and restore the clone
/// when the construct turns out not to close.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current index into `s`. Always on a char boundary between calls.
    pub i: usize,
    /// Whether index 0 is the start of a source line.
    starts_line: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, starts_line: bool) -> Self {
        Self {
            s,
            i: 0,
            starts_line,
        }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte before the cursor, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|p| self.s.as_bytes().get(p).copied())
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i.min(self.s.len())..]
    }

    pub fn at_line_start(&self) -> bool {
        match self.prev() {
            None => self.starts_line,
            Some(b) => b == b'\n',
        }
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances past one whole character.
    pub fn bump_char(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.i += c.len_utf8();
        }
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances while `pred` holds, returning how many bytes were consumed.
    pub fn bump_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
        self.i - start
    }

    /// Text between `start` and the cursor.
    pub fn since(&self, start: usize) -> &'a str {
        &self.s[start..self.i]
    }
}
