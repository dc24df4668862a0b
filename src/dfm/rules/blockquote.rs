//! Block quote rule
//!
//!     Matches one or more `>`-marked lines plus their lazy continuation lines
//!     (non-blank lines that follow a quoted line without their own marker, as in
//!     GFM). The marker may be indented by up to three columns.
//!
//!     The matched span is re-parsed recursively: one `>` marker plus an optional
//!     following space is stripped from each marked line and the engine's block phase
//!     runs again over the stripped text, with the block scope's "inside a block
//!     quote" variable set for the duration of the recursion. This is what arms the
//!     note rule for the inner lines. The previous scope value is restored before the
//!     rule returns, whether or not the recursion succeeded.
//!
//!     Children are parsed from the stripped copy, so their offsets are relative to
//!     that buffer; the container's own raw span covers the original quoted text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{BlockquoteToken, Token, TokenInfo};

static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| {
    // A continuation line must open with a character that is not quote-line
    // whitespace; \r counts as whitespace so CRLF blank lines end the quote.
    Regex::new(r"^(?:[ \t]{0,3}>[^\n]*(?:\n|$)(?:[ \t\r]*[^ \t\r\n>][^\n]*(?:\n|$))*)+")
        .expect("invalid blockquote pattern")
});

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}> ?").expect("invalid marker pattern"));

static QUOTE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]{0,3}>").expect("invalid quote start pattern"));

/// Whether `line` opens a block quote. The paragraph rule uses this to stop
/// before a quote so the two rules partition their lines identically.
pub(crate) fn is_blockquote_start(line: &str) -> bool {
    QUOTE_START.is_match(line)
}

pub struct BlockquoteBlockRule;

impl Rule for BlockquoteBlockRule {
    fn name(&self) -> &'static str {
        "Block.Blockquote"
    }

    fn try_match(
        &self,
        engine: &Engine,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        let Some(matched) = BLOCKQUOTE.find(source.remaining()) else {
            return Ok(None);
        };
        let raw = matched.as_str();
        let inner = MARKER.replace_all(raw, "");

        let previous = context.block.in_blockquote;
        context.block.in_blockquote = true;
        let result = engine.parse_block_span(context, Source::new(&inner));
        context.block.in_blockquote = previous;
        let children = result?;

        Ok(Some(Token::Blockquote(BlockquoteToken {
            info: TokenInfo::new(self.name(), raw, source.offset()),
            children,
        })))
    }
}
