#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// The opening run of a fence: its character and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

impl FenceSig {
    /// The delimiter as written, e.g. "````".
    pub fn delimiter(self) -> String {
        char::from(self.kind.byte()).to_string().repeat(self.len)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Detects a fence opener, returning its signature and info string.
    pub fn sig(remainder: &str) -> Option<(FenceSig, &str)> {
        let t = remainder.trim_end_matches(['\r', '\n']);
        let kind = match t.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.bytes().take_while(|b| *b == kind.byte()).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = t[len..].trim();
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some((FenceSig { kind, len }, info))
    }

    /// A closing fence is a line holding only a run of the opening character
    /// at least as long as the opener.
    pub fn closes(open: FenceSig, line: &str) -> bool {
        let t = line.trim();
        let len = t.bytes().take_while(|b| *b == open.kind.byte()).count();
        len >= open.len && len == t.len()
    }
}
