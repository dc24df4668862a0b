//! Test support for token trees
//!
//!     Panicking extractors used by the integration suites: each `expect_*` helper
//!     asserts a token's variant and hands back the typed payload, failing with the
//!     treeviz rendering of the offending token so a mismatch reads at a glance.
//!     Production code must not depend on this module.

use crate::dfm::engine::Engine;
use crate::dfm::formats::to_treeviz_str;
use crate::dfm::token::{
    BlockquoteToken, InlineSpan, LinkToken, NoteBlockToken, NoteToken, ParagraphToken, TextToken,
    Token,
};

/// Parse with the standard DFM engine, panicking on error.
pub fn parse_dfm(source: &str) -> Vec<Token> {
    Engine::dfm()
        .parse(source)
        .unwrap_or_else(|error| panic!("parse failed: {error}\nsource: {source:?}"))
}

fn mismatch(expected: &str, token: &Token) -> ! {
    panic!(
        "expected {expected}, found {}:\n{}",
        token.rule(),
        to_treeviz_str(std::slice::from_ref(token))
    )
}

pub fn expect_paragraph(token: &Token) -> &ParagraphToken {
    match token {
        Token::Paragraph(paragraph) => paragraph,
        other => mismatch("a paragraph", other),
    }
}

pub fn expect_blockquote(token: &Token) -> &BlockquoteToken {
    match token {
        Token::Blockquote(quote) => quote,
        other => mismatch("a block quote", other),
    }
}

pub fn expect_note(token: &Token) -> &NoteToken {
    match token {
        Token::Note(note) => note,
        other => mismatch("a note marker", other),
    }
}

pub fn expect_note_block(token: &Token) -> &NoteBlockToken {
    match token {
        Token::NoteBlock(note_block) => note_block,
        other => mismatch("a note block", other),
    }
}

pub fn expect_link(token: &Token) -> &LinkToken {
    match token {
        Token::Link(link) => link,
        other => mismatch("a link", other),
    }
}

pub fn expect_text(token: &Token) -> &TextToken {
    match token {
        Token::Text(text) => text,
        other => mismatch("a text span", other),
    }
}

/// The resolved inline children of a paragraph; panics on a raw span, which the
/// engine never returns from a completed parse.
pub fn inline_children(paragraph: &ParagraphToken) -> &[Token] {
    match &paragraph.content {
        InlineSpan::Parsed(children) => children,
        InlineSpan::Raw(text) => panic!("paragraph content is still raw: {text:?}"),
    }
}

/// Concatenated raw spans of a token forest; equals the original source for any
/// tree the rewrite chain left untouched.
pub fn concat_raw(tokens: &[Token]) -> String {
    tokens.iter().map(Token::raw).collect()
}
