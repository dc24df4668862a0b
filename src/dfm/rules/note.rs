//! DFM note block rule
//!
//!     Recognizes a marker line of the form `[!NOTE]` (or WARNING, TIP, IMPORTANT,
//!     CAUTION; keyword matching is case-insensitive) at the start of the remaining
//!     input, with optional surrounding whitespace and a line terminator or end of
//!     input after the closing bracket.
//!
//!     The rule is context-gated: it declines unconditionally unless the block
//!     scope's "inside a block quote" variable is set, no matter what the text looks
//!     like. A `[!NOTE]` line in plain top-level prose therefore falls through to the
//!     paragraph rule, which is exactly the DFM behavior: notes are a block quote
//!     dialect, not a general marker.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{NoteToken, NoteType, Token, TokenInfo};

static NOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*\[!(?P<notetype>NOTE|WARNING|TIP|IMPORTANT|CAUTION)\][ \t\r]*(?:\n|$)")
        .expect("invalid note pattern")
});

pub struct NoteBlockRule;

impl Rule for NoteBlockRule {
    fn name(&self) -> &'static str {
        "Block.Dfm.Note"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        if !context.block.in_blockquote {
            return Ok(None);
        }
        let Some(captures) = NOTE.captures(source.remaining()) else {
            return Ok(None);
        };
        let raw = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
        let keyword = &captures["notetype"];
        let note_type = NoteType::from_str(keyword)
            .unwrap_or_else(|_| unreachable!("pattern only matches known keywords"));
        Ok(Some(Token::Note(NoteToken {
            info: TokenInfo::new(self.name(), raw, source.offset()),
            note_type,
        })))
    }
}
