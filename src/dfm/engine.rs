//! Engine - rule dispatch and pipeline orchestrator
//!
//!     The engine owns the two rule chains, the rewriter chain, and the nesting
//!     limit. Chain definitions are immutable once built, so a single engine is
//!     safely shared by concurrent parses of different documents; all mutable state
//!     lives in the per-parse [ParseContext].
//!
//! The dispatch loop
//!
//!     Each iteration tries the rules of a chain in order against the remaining
//!     source; the first rule returning a token wins. The cursor then advances by
//!     exactly the length of the token's raw span, which is how consumption is
//!     accounted: a rule that consumes nothing (or claims more than remains) is
//!     reported as a consumption violation rather than looping, and a position no
//!     rule matches is a grammar-incompleteness error. With the standard DFM chains
//!     the catch-all rules make both unreachable.
//!
//! Phases
//!
//!     [parse](Engine::parse) runs the full pipeline: the block phase over the whole
//!     document, an inline resolution pass that parses every paragraph's raw content
//!     with the inline chain (after which no container holds unparsed text), and
//!     finally the configured rewriter chain. Rules recognizing nested structures
//!     re-enter the block or inline phase through [parse_block_span](Engine::parse_block_span)
//!     and [parse_inline_span](Engine::parse_inline_span); both count nesting depth
//!     and abort once the configured maximum is crossed.

use crate::dfm::context::ParseContext;
use crate::dfm::error::ParseError;
use crate::dfm::rewriters::{Rewriter, RewriterChain};
use crate::dfm::rules::{dfm_block_rules, dfm_inline_rules, Rule, RuleChain};
use crate::dfm::source::Source;
use crate::dfm::token::{InlineSpan, ParagraphToken, Token};

/// Default bound on recursive span parsing. Deep enough for any sane document;
/// shallow enough to fail long before the stack does.
pub const DEFAULT_MAX_DEPTH: usize = 32;

pub struct Engine {
    block_rules: RuleChain,
    inline_rules: RuleChain,
    rewriters: RewriterChain,
    max_depth: usize,
}

impl Engine {
    /// An engine with the standard DFM chains and no rewriters.
    pub fn dfm() -> Self {
        Engine::builder()
            .block_rules(dfm_block_rules())
            .inline_rules(dfm_inline_rules())
            .build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Parse a full document: block phase, inline resolution, rewrite pass.
    ///
    /// A fresh context is created per call and discarded when parsing completes.
    pub fn parse(&self, source: &str) -> Result<Vec<Token>, ParseError> {
        let mut context = ParseContext::new();
        let tokens = self.parse_block_span(&mut context, Source::new(source))?;
        let tokens = self.resolve_inline_spans(&mut context, tokens)?;
        Ok(self.rewriters.rewrite(self, &tokens))
    }

    /// Run the block chain over one span. Block rules recognizing nested
    /// structures call this recursively on their inner text.
    pub fn parse_block_span(
        &self,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Vec<Token>, ParseError> {
        self.parse_span(&self.block_rules, context, source)
    }

    /// Run the inline chain over one span. Inline rules parsing sub-spans (link
    /// labels) call this recursively.
    pub fn parse_inline_span(
        &self,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Vec<Token>, ParseError> {
        self.parse_span(&self.inline_rules, context, source)
    }

    fn parse_span(
        &self,
        chain: &RuleChain,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Vec<Token>, ParseError> {
        context.enter_nested();
        if context.depth() > self.max_depth {
            context.leave_nested();
            return Err(ParseError::ExcessiveNesting {
                offset: source.offset(),
                max_depth: self.max_depth,
            });
        }
        let result = self.run_chain(chain, context, source);
        context.leave_nested();
        result
    }

    fn run_chain(
        &self,
        chain: &RuleChain,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut cursor = source;
        while !cursor.is_empty() {
            let mut matched = None;
            for rule in chain.iter() {
                if let Some(token) = rule.try_match(self, context, cursor)? {
                    matched = Some(token);
                    break;
                }
            }
            let Some(token) = matched else {
                return Err(ParseError::GrammarIncomplete {
                    offset: cursor.offset(),
                });
            };
            let consumed = token.raw().len();
            if consumed == 0 || consumed > cursor.len() {
                return Err(ParseError::ConsumptionViolation {
                    rule: token.rule().to_string(),
                    offset: cursor.offset(),
                });
            }
            log::trace!(
                "rule {} matched {} bytes at offset {}",
                token.rule(),
                consumed,
                cursor.offset()
            );
            cursor = cursor.advance(consumed);
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Resolve every raw inline span in the tree, so no container leaves the
    /// parse holding unparsed text.
    fn resolve_inline_spans(
        &self,
        context: &mut ParseContext,
        tokens: Vec<Token>,
    ) -> Result<Vec<Token>, ParseError> {
        tokens
            .into_iter()
            .map(|token| self.resolve_token(context, token))
            .collect()
    }

    fn resolve_token(
        &self,
        context: &mut ParseContext,
        token: Token,
    ) -> Result<Token, ParseError> {
        match token {
            Token::Paragraph(paragraph) => {
                let content = match paragraph.content {
                    InlineSpan::Raw(text) => InlineSpan::Parsed(
                        self.parse_inline_span(context, Source::new(&text))?,
                    ),
                    resolved @ InlineSpan::Parsed(_) => resolved,
                };
                Ok(Token::Paragraph(ParagraphToken {
                    info: paragraph.info,
                    content,
                }))
            }
            Token::Blockquote(mut quote) => {
                quote.children = self.resolve_inline_spans(context, quote.children)?;
                Ok(Token::Blockquote(quote))
            }
            Token::NoteBlock(mut note_block) => {
                note_block.children = self.resolve_inline_spans(context, note_block.children)?;
                Ok(Token::NoteBlock(note_block))
            }
            leaf => Ok(leaf),
        }
    }
}

/// Assembles custom engines: chain replacement, positional rule insertion,
/// rewriters, and the depth limit.
pub struct EngineBuilder {
    block_rules: RuleChain,
    inline_rules: RuleChain,
    rewriters: RewriterChain,
    max_depth: usize,
}

impl EngineBuilder {
    fn new() -> Self {
        EngineBuilder {
            block_rules: RuleChain::new(),
            inline_rules: RuleChain::new(),
            rewriters: RewriterChain::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the block chain wholesale.
    pub fn block_rules(mut self, chain: RuleChain) -> Self {
        self.block_rules = chain;
        self
    }

    /// Replace the inline chain wholesale.
    pub fn inline_rules(mut self, chain: RuleChain) -> Self {
        self.inline_rules = chain;
        self
    }

    /// Append a block rule at the end of the chain (lowest priority).
    pub fn block_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.block_rules.push(rule);
        self
    }

    /// Insert a block rule ahead of the named rule, claiming its priority.
    /// Appends at the end if no rule by that name exists.
    pub fn block_rule_before(mut self, name: &str, rule: Box<dyn Rule>) -> Self {
        self.block_rules.insert_before_or_push(name, rule);
        self
    }

    /// Append an inline rule at the end of the chain (lowest priority).
    pub fn inline_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.inline_rules.push(rule);
        self
    }

    /// Insert an inline rule ahead of the named rule, claiming its priority.
    pub fn inline_rule_before(mut self, name: &str, rule: Box<dyn Rule>) -> Self {
        self.inline_rules.insert_before_or_push(name, rule);
        self
    }

    /// Append a rewriter at the end of the rewrite chain.
    pub fn rewriter(mut self, rewriter: Box<dyn Rewriter>) -> Self {
        self.rewriters.push(rewriter);
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            block_rules: self.block_rules,
            inline_rules: self.inline_rules,
            rewriters: self.rewriters,
            max_depth: self.max_depth,
        }
    }
}
