//! Blank line rule
//!
//!     Consumes runs of blank lines (whitespace-only up to and including the line
//!     terminator) so paragraph boundaries survive as tokens and the round-trip
//!     invariant holds for documents with vertical spacing. A whitespace-only final
//!     line with no terminator is also claimed here, keeping the block chain total.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{NewlineToken, Token, TokenInfo};

static NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:[ \t\r]*\n)+|[ \t\r]+$)").expect("invalid newline pattern"));

pub struct NewlineBlockRule;

impl Rule for NewlineBlockRule {
    fn name(&self) -> &'static str {
        "Block.Newline"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        _context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        let Some(matched) = NEWLINE.find(source.remaining()) else {
            return Ok(None);
        };
        Ok(Some(Token::Newline(NewlineToken {
            info: TokenInfo::new(self.name(), matched.as_str(), source.offset()),
        })))
    }
}
