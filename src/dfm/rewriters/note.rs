//! Note rewriter
//!
//!     Specializes a block quote whose first child past any leading blank lines is a
//!     DFM note marker into a typed note block: the marker is absorbed into the
//!     container's `note_type` and the remaining children become the note's content.
//!     Every other token - including note blocks this rewriter produced on an
//!     earlier pass - is declined, which is what makes the rewrite idempotent.

use crate::dfm::engine::Engine;
use crate::dfm::rewriters::Rewriter;
use crate::dfm::token::{NoteBlockToken, Token};

pub struct NoteRewriter;

impl Rewriter for NoteRewriter {
    fn rewrite(&self, _engine: &Engine, token: &Token) -> Option<Token> {
        let Token::Blockquote(quote) = token else {
            return None;
        };
        let marker = quote
            .children
            .iter()
            .position(|child| !matches!(child, Token::Newline(_)))?;
        let Token::Note(note) = &quote.children[marker] else {
            return None;
        };
        let children = quote
            .children
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != marker)
            .map(|(_, child)| child.clone())
            .collect();
        Some(Token::NoteBlock(NoteBlockToken {
            info: quote.info.clone(),
            note_type: note.note_type,
            children,
        }))
    }
}
