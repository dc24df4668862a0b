//! DFM parsing engine
//!
//!     This module hosts the complete tokenization and rewriting pipeline for the DFM
//!     markdown dialect. The pipeline transforms a source string into a fully resolved
//!     token tree through these stages:
//!
//!         1. Block phase: the ordered block rule chain is matched against the remaining
//!            source, first match wins, and the cursor advances by exactly the matched
//!            span. Nested structures (block quotes) recursively re-enter the block
//!            phase on their inner text. See [engine] and [rules].
//!
//!         2. Inline phase: the textual content of block tokens (paragraphs) is parsed
//!            with a separate inline rule chain, producing link and text spans. After
//!            this phase no container holds raw unparsed text.
//!
//!         3. Rewriting: an ordered chain of rewriters visits every node of the tree in
//!            post-order, giving extensions the chance to replace generic tokens with
//!            specialized ones (the DFM note block is the built-in example). See
//!            [rewriters].
//!
//! Context
//!
//!     Rules consult per-parse context variables to scope grammar extensions to a
//!     syntactic position. The block scope tracks "inside a block quote" (the DFM note
//!     rule only fires there), the inline scope tracks "inside a link" (the autolink
//!     rule refuses to nest anchors). Scopes are saved and restored symmetrically
//!     around every recursive sub-parse, so no state leaks across sibling constructs.
//!     See [context].
//!
//! Provenance
//!
//!     Every token records the name of the rule that produced it, the raw source span
//!     it consumed, and the byte offset where it matched. Concatenating the raw spans
//!     of the top-level tokens reconstructs the original source exactly, as long as no
//!     rewriter fired. This is the round-trip invariant the engine's consumption
//!     accounting is built on.

pub mod context;
pub mod engine;
pub mod error;
pub mod formats;
pub mod rewriters;
pub mod rules;
pub mod source;
pub mod strings;
pub mod testing;
pub mod token;

pub use context::{BlockScope, InlineScope, ParseContext};
pub use engine::{Engine, EngineBuilder, DEFAULT_MAX_DEPTH};
pub use error::ParseError;
pub use rewriters::{NoteRewriter, NullRewriter, Rewriter, RewriterChain};
pub use rules::{dfm_block_rules, dfm_inline_rules, Rule, RuleChain};
pub use source::Source;
pub use token::{
    BlockquoteToken, InlineSpan, LinkToken, NewlineToken, NoteBlockToken, NoteToken, NoteType,
    ParagraphToken, TextToken, Token, TokenInfo,
};
