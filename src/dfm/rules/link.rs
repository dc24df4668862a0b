//! Inline link rule
//!
//!     Matches `[label](href)` and `[label](href "title")`. The label is recursively
//!     inline-parsed with the inline scope's "inside a link" variable set, so neither
//!     this rule nor the autolink rule can produce a nested anchor; a URL written
//!     inside the label stays plain text. The display text of the produced token is
//!     the flattened text of that sub-parse.
//!
//!     Like every inline rule, it declines while already inside a link.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::rules::Rule;
use crate::dfm::source::Source;
use crate::dfm::token::{LinkToken, Token, TokenInfo};

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[(?P<label>[^\[\]]*)\]\((?P<href>[^)\s]*)(?:[ \t]+"(?P<title>[^"]*)")?\)"#)
        .expect("invalid link pattern")
});

pub struct LinkInlineRule;

impl Rule for LinkInlineRule {
    fn name(&self) -> &'static str {
        "Inline.Link"
    }

    fn try_match(
        &self,
        engine: &Engine,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        if context.inline.in_link {
            return Ok(None);
        }
        let Some(captures) = LINK.captures(source.remaining()) else {
            return Ok(None);
        };
        let raw = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
        let label = captures.name("label").map(|m| m.as_str()).unwrap_or_default();
        let href = captures.name("href").map(|m| m.as_str()).unwrap_or_default();
        let title = captures.name("title").map(|m| m.as_str().to_string());

        let previous = context.inline.in_link;
        context.inline.in_link = true;
        let result = engine.parse_inline_span(context, Source::new(label));
        context.inline.in_link = previous;
        let label_tokens = result?;

        let text: String = label_tokens.iter().map(Token::text_content).collect();
        Ok(Some(Token::Link(LinkToken {
            info: TokenInfo::new(self.name(), raw, source.offset()),
            text,
            title,
            href: href.to_string(),
        })))
    }
}
