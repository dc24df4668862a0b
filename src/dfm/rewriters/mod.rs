//! Rewriters
//!
//!     A rewriter is offered the engine and a token and either returns a replacement
//!     or declines. Rewriters compose into an ordered chain applied to every node of
//!     a token tree; this is the plugin surface through which format extensions
//!     specialize generic tokens after parsing (the DFM note block in [note] is the
//!     built-in example). The engine parameter lets a rewriter re-enter tokenization
//!     to build its replacement; the built-ins ignore it.
//!
//! Traversal and short-circuiting
//!
//!     The chain traverses the tree in post-order: a container's children are
//!     rewritten and the container rebuilt around them before the container itself
//!     is offered to the chain. For each node the rewriters run in order and the
//!     first replacement wins; if every rewriter declines, the rebuilt node is kept
//!     as is. A rewriter returning a replacement takes responsibility for the whole
//!     subtree it returns - the chain does not descend into replacements.
//!
//!     Declining is indistinguishable from not being in the chain at all, which is
//!     what makes [NullRewriter] a valid zero-effect member and an empty chain the
//!     identity transformation.
//!
//! Idempotence
//!
//!     A well-formed chain is idempotent: a token already in final form is never
//!     rewritten into something else, so applying the chain twice yields an
//!     identical tree. The chain runner does not enforce this; a non-idempotent
//!     rewriter is a bug in the rewriter, not engine behavior.

pub mod note;

pub use note::NoteRewriter;

use crate::dfm::engine::Engine;
use crate::dfm::token::{InlineSpan, ParagraphToken, Token};

/// A tree-rewrite unit: return a replacement token, or decline with `None`.
pub trait Rewriter: Send + Sync {
    fn rewrite(&self, engine: &Engine, token: &Token) -> Option<Token>;
}

/// The null object: a rewriter that always declines.
pub struct NullRewriter;

impl Rewriter for NullRewriter {
    fn rewrite(&self, _engine: &Engine, _token: &Token) -> Option<Token> {
        None
    }
}

/// An ordered list of rewriters applied to every node of a token tree.
#[derive(Default)]
pub struct RewriterChain {
    rewriters: Vec<Box<dyn Rewriter>>,
}

impl RewriterChain {
    pub fn new() -> Self {
        RewriterChain::default()
    }

    /// Append a rewriter at the end of the chain (lowest priority).
    pub fn push(&mut self, rewriter: Box<dyn Rewriter>) {
        self.rewriters.push(rewriter);
    }

    pub fn len(&self) -> usize {
        self.rewriters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewriters.is_empty()
    }

    /// Rewrite a forest of sibling tokens, post-order. Unchanged subtrees come
    /// back as clones of the originals.
    pub fn rewrite(&self, engine: &Engine, tokens: &[Token]) -> Vec<Token> {
        tokens
            .iter()
            .map(|token| self.rewrite_token(engine, token))
            .collect()
    }

    fn rewrite_token(&self, engine: &Engine, token: &Token) -> Token {
        let rebuilt = match token {
            Token::Blockquote(quote) => {
                let mut quote = quote.clone();
                quote.children = self.rewrite(engine, &quote.children);
                Token::Blockquote(quote)
            }
            Token::NoteBlock(note_block) => {
                let mut note_block = note_block.clone();
                note_block.children = self.rewrite(engine, &note_block.children);
                Token::NoteBlock(note_block)
            }
            Token::Paragraph(ParagraphToken {
                info,
                content: InlineSpan::Parsed(children),
            }) => Token::Paragraph(ParagraphToken {
                info: info.clone(),
                content: InlineSpan::Parsed(self.rewrite(engine, children)),
            }),
            other => other.clone(),
        };
        for rewriter in &self.rewriters {
            if let Some(replacement) = rewriter.rewrite(engine, &rebuilt) {
                log::debug!(
                    "rewriter replaced a {} token at offset {}",
                    rebuilt.rule(),
                    rebuilt.offset()
                );
                return replacement;
            }
        }
        rebuilt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfm::token::{TextToken, TokenInfo};

    fn text(content: &str) -> Token {
        Token::Text(TextToken {
            info: TokenInfo::new("Inline.Text", content, 0),
            content: content.to_string(),
        })
    }

    /// Rewrites every text token to upper case; used to observe dispatch.
    struct UpperCaser;

    impl Rewriter for UpperCaser {
        fn rewrite(&self, _engine: &Engine, token: &Token) -> Option<Token> {
            match token {
                Token::Text(t) if t.content.chars().any(|c| c.is_lowercase()) => {
                    let mut upper = t.clone();
                    upper.content = t.content.to_uppercase();
                    Some(Token::Text(upper))
                }
                _ => None,
            }
        }
    }

    struct Eraser;

    impl Rewriter for Eraser {
        fn rewrite(&self, _engine: &Engine, token: &Token) -> Option<Token> {
            match token {
                Token::Text(t) => {
                    let mut erased = t.clone();
                    erased.content = String::new();
                    Some(Token::Text(erased))
                }
                _ => None,
            }
        }
    }

    /// Expands a `@docs` text placeholder by re-entering the engine.
    struct DocsLinkExpander;

    impl Rewriter for DocsLinkExpander {
        fn rewrite(&self, engine: &Engine, token: &Token) -> Option<Token> {
            match token {
                Token::Text(t) if t.content == "@docs" => engine
                    .parse("[docs](http://example.com/docs)")
                    .ok()?
                    .into_iter()
                    .next(),
                _ => None,
            }
        }
    }

    #[test]
    fn empty_chain_is_identity() {
        let tokens = vec![text("hello")];
        assert_eq!(RewriterChain::new().rewrite(&Engine::dfm(), &tokens), tokens);
    }

    #[test]
    fn null_rewriter_is_zero_effect() {
        let tokens = vec![text("hello")];
        let mut chain = RewriterChain::new();
        chain.push(Box::new(NullRewriter));
        assert_eq!(chain.rewrite(&Engine::dfm(), &tokens), tokens);
    }

    #[test]
    fn first_replacement_wins() {
        let engine = Engine::dfm();
        let tokens = vec![text("hello")];

        let mut upper_first = RewriterChain::new();
        upper_first.push(Box::new(UpperCaser));
        upper_first.push(Box::new(Eraser));
        assert_eq!(upper_first.rewrite(&engine, &tokens)[0].text_content(), "HELLO");

        let mut eraser_first = RewriterChain::new();
        eraser_first.push(Box::new(Eraser));
        eraser_first.push(Box::new(UpperCaser));
        assert_eq!(eraser_first.rewrite(&engine, &tokens)[0].text_content(), "");
    }

    #[test]
    fn declining_falls_through_to_later_rewriters() {
        let tokens = vec![text("hello")];
        let mut chain = RewriterChain::new();
        chain.push(Box::new(NullRewriter));
        chain.push(Box::new(UpperCaser));
        assert_eq!(chain.rewrite(&Engine::dfm(), &tokens)[0].text_content(), "HELLO");
    }

    #[test]
    fn rewriters_can_reenter_the_engine() {
        let tokens = vec![text("@docs")];
        let mut chain = RewriterChain::new();
        chain.push(Box::new(DocsLinkExpander));
        let rewritten = chain.rewrite(&Engine::dfm(), &tokens);
        match &rewritten[0] {
            Token::Paragraph(paragraph) => match &paragraph.content {
                InlineSpan::Parsed(children) => {
                    assert!(matches!(children[0], Token::Link(_)));
                }
                raw => panic!("expected resolved content, got {:?}", raw),
            },
            other => panic!("expected the re-parsed replacement, got {:?}", other),
        }
    }
}
