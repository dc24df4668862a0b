//! Paragraph rule
//!
//!     The block-phase catch-all: consumes one or more consecutive lines that are
//!     neither blank nor block quote starts. Anything the more specific block rules
//!     decline lands here, which is what makes the standard block chain total - every
//!     non-empty input starts with a blank line (newline rule), a quote line
//!     (block quote rule), or a line this rule claims.
//!
//!     The paragraph's content is its raw span without the final line terminator; the
//!     inline phase later resolves it into text and link tokens.

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::blockquote::is_blockquote_start;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{InlineSpan, ParagraphToken, Token, TokenInfo};

pub struct ParagraphBlockRule;

impl Rule for ParagraphBlockRule {
    fn name(&self) -> &'static str {
        "Block.Paragraph"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        _context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        let text = source.remaining();
        let mut consumed = 0;
        for line in text.split_inclusive('\n') {
            if line.trim().is_empty() || is_blockquote_start(line) {
                break;
            }
            consumed += line.len();
        }
        if consumed == 0 {
            return Ok(None);
        }
        let raw = &text[..consumed];
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Ok(Some(Token::Paragraph(ParagraphToken {
            info: TokenInfo::new(self.name(), raw, source.offset()),
            content: InlineSpan::Raw(content.to_string()),
        })))
    }
}
