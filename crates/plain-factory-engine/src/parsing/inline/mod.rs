//! # Inline Parsing
//!
//! Cursor-based inline parsing with explicit raw zones.
//!
//! Inline parsing runs after the structural parse, over the joined lines of
//! paragraphs and headings and over footnote definition text.
//!
//! - **`kinds`**: inline types that own their delimiters
//! - **`cursor`**: [`Cursor`](cursor::Cursor) for byte-wise scanning with backtracking
//! - **`parser`**: [`parse_inline`] and its `try_parse_*` helpers
//!
//! ## Precedence
//!
//! Code spans are raw zones and win over everything else: `` `[^1]` `` is code,
//! not a footnote use. Inline HTML is taken whole up to its matching close tag.
//! Constructs that never close fall back to text.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
