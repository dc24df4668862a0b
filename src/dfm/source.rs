//! Source cursor
//!
//!     A [Source] is an immutable view over the unconsumed remainder of the document
//!     plus its absolute byte offset in the original text. The engine never copies the
//!     buffer while scanning; rules receive the cursor by value, match against
//!     [remaining](Source::remaining), and the engine advances past exactly the span
//!     the produced token claims as its raw text.
//!
//!     The offset is what gives tokens their provenance: error diagnostics and the
//!     "view source" links of the host pipeline both map back through it.

/// An immutable cursor over the remaining unconsumed source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Source<'a> {
    /// Create a cursor at the start of `text` (absolute offset zero).
    pub fn new(text: &'a str) -> Self {
        Source { text, offset: 0 }
    }

    /// The remaining unconsumed text.
    pub fn remaining(&self) -> &'a str {
        self.text
    }

    /// Absolute byte offset of the cursor in the original document.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Remaining length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A new cursor past the first `consumed` bytes.
    ///
    /// `consumed` must lie on a char boundary of the remaining text; rules that
    /// derive their raw span from a regex match at the start of the input satisfy
    /// this by construction.
    pub fn advance(&self, consumed: usize) -> Source<'a> {
        Source {
            text: &self.text[consumed..],
            offset: self.offset + consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_absolute_offset() {
        let cursor = Source::new("hello world");
        let moved = cursor.advance(6);
        assert_eq!(moved.remaining(), "world");
        assert_eq!(moved.offset(), 6);
        // The original cursor is untouched.
        assert_eq!(cursor.remaining(), "hello world");
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn advance_composes() {
        let cursor = Source::new("abcdef").advance(2).advance(3);
        assert_eq!(cursor.remaining(), "f");
        assert_eq!(cursor.offset(), 5);
    }

    #[test]
    fn empty_cursor() {
        let cursor = Source::new("");
        assert!(cursor.is_empty());
        assert_eq!(cursor.len(), 0);
    }
}
