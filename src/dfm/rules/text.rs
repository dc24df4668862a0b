//! Inline text rule
//!
//!     The inline-phase catch-all. It consumes everything up to (but not including)
//!     the next position that could start a link: a `[`, or an `http://`/`https://`
//!     candidate at a word boundary. If no candidate follows, it consumes the whole
//!     remaining span.
//!
//!     Candidates are only recognized past the first character, so the rule always
//!     consumes at least one character - including when it sits right on a candidate
//!     the earlier rules just declined (a malformed link, an ill-formed URL). That
//!     single-character guarantee is what upholds the consumption invariant for the
//!     inline chain.

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{TextToken, Token, TokenInfo};

/// Byte index of the next possible link start strictly past the first char.
fn next_candidate(text: &str) -> Option<usize> {
    let mut previous: Option<char> = None;
    for (index, ch) in text.char_indices() {
        if index == 0 {
            previous = Some(ch);
            continue;
        }
        if ch == '[' {
            return Some(index);
        }
        let at_word_boundary = !previous.is_some_and(|p| p.is_alphanumeric());
        if at_word_boundary
            && (text[index..].starts_with("http://") || text[index..].starts_with("https://"))
        {
            return Some(index);
        }
        previous = Some(ch);
    }
    None
}

pub struct TextInlineRule;

impl Rule for TextInlineRule {
    fn name(&self) -> &'static str {
        "Inline.Text"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        _context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        let text = source.remaining();
        if text.is_empty() {
            return Ok(None);
        }
        let end = next_candidate(text).unwrap_or(text.len());
        let raw = &text[..end];
        Ok(Some(Token::Text(TextToken {
            info: TokenInfo::new(self.name(), raw, source.offset()),
            content: raw.to_string(),
        })))
    }
}
