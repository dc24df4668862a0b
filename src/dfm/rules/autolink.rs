//! GFM autolink rule
//!
//!     Recognizes a bare `http://` or `https://` URL at the start of the remaining
//!     input. The rule is negatively gated: it declines while the inline scope's
//!     "inside a link" variable is set, which is what keeps anchors from nesting.
//!
//!     A pattern hit is not yet a match. The captured text is escaped for safe HTML
//!     embedding and then validated as a well-formed URI; if validation fails the
//!     rule declines and the engine falls through to the next rule in the chain.
//!     Partial-match-then-reject is a normal path here, not an error.
//!
//!     The produced link token's display text and href both equal the escaped
//!     validated text; bare URLs carry no title.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::strings::{escape_html, is_well_formed_uri};
use crate::dfm::token::{LinkToken, Token, TokenInfo};

// Trailing punctuation that commonly follows a URL in prose is left unconsumed.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(https?://[^\s<]*[^\s<.,:;"')\]])"#).expect("invalid url pattern")
});

pub struct AutolinkInlineRule;

impl Rule for AutolinkInlineRule {
    fn name(&self) -> &'static str {
        "Inline.Gfm.Url"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        if context.inline.in_link {
            return Ok(None);
        }
        let Some(matched) = URL.find(source.remaining()) else {
            return Ok(None);
        };
        let text = escape_html(matched.as_str());
        if !is_well_formed_uri(&text) {
            return Ok(None);
        }
        Ok(Some(Token::Link(LinkToken {
            info: TokenInfo::new(self.name(), matched.as_str(), source.offset()),
            text: text.clone(),
            title: None,
            href: text,
        })))
    }
}
