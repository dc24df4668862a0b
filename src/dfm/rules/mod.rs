//! Grammar rules
//!
//!     A rule is a named unit implementing "try to match the start of the remaining
//!     input; if matched, build a token; otherwise decline". Rules are pure functions
//!     of (engine, context, remaining source): they keep no mutable state of their
//!     own, so a chain built once can be shared by concurrent parses of different
//!     documents.
//!
//!     Rules are tried in declaration order and the first match wins. Order matters:
//!     a format-specific rule registered ahead of a generic one overrides it without
//!     the generic rule knowing. The chain supports positional insertion by rule name
//!     so extensions can slot themselves exactly where they need to be.
//!
//! Consumption
//!
//!     A successful match must consume a non-empty prefix of the input: the engine
//!     advances the cursor by the length of the token's raw span, and a zero-length
//!     span would loop forever. The engine enforces this and fails fast on
//!     violations; see [ParseError::ConsumptionViolation](crate::dfm::error::ParseError).
//!
//! The standard DFM chains
//!
//!     Block chain, in priority order:
//!
//!         1. Block.Newline - blank lines
//!         2. Block.Dfm.Note - `[!NOTE]` markers, gated on "inside a block quote"
//!         3. Block.Blockquote - `>` containers, recursive
//!         4. Block.Paragraph - catch-all for consecutive non-blank lines
//!
//!     Inline chain, in priority order:
//!
//!         1. Inline.Link - `[label](href "title")`, gated off inside links
//!         2. Inline.Gfm.Url - bare URLs, gated off inside links
//!         3. Inline.Text - catch-all text spans
//!
//!     Both chains end in a catch-all, so the standard grammar is total and the
//!     grammar-incomplete error is reserved for user-assembled chains.

pub mod autolink;
pub mod blockquote;
pub mod link;
pub mod newline;
pub mod note;
pub mod paragraph;
pub mod text;

pub use autolink::AutolinkInlineRule;
pub use blockquote::BlockquoteBlockRule;
pub use link::LinkInlineRule;
pub use newline::NewlineBlockRule;
pub use note::NoteBlockRule;
pub use paragraph::ParagraphBlockRule;
pub use text::TextInlineRule;

use crate::dfm::context::ParseContext;
use crate::dfm::engine::Engine;
use crate::dfm::error::ParseError;
use crate::dfm::source::Source;
use crate::dfm::token::Token;

/// A named grammar rule tried against the start of the remaining input.
pub trait Rule: Send + Sync {
    /// Unique name, used for diagnostics, origin-dispatching rewriters, and
    /// positional chain insertion.
    fn name(&self) -> &'static str;

    /// Try to match a prefix of `source`.
    ///
    /// Returns `Ok(None)` to decline, either because the pattern did not match or
    /// because a post-condition failed after it did; declining is the expected
    /// path, never an error. Rules recognizing nested structures re-enter the
    /// engine here, which is the only way `Err` arises.
    fn try_match(
        &self,
        engine: &Engine,
        context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError>;
}

/// An ordered list of rules; earlier rules take priority.
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleChain {
    pub fn new() -> Self {
        RuleChain::default()
    }

    /// Append a rule at the end of the chain (lowest priority).
    pub fn push(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Insert a rule immediately before the rule named `name`, claiming its
    /// priority. Returns false (and leaves the chain unchanged) if no rule by
    /// that name exists.
    pub fn insert_before(&mut self, name: &str, rule: Box<dyn Rule>) -> bool {
        match self.position(name) {
            Some(index) => {
                self.rules.insert(index, rule);
                true
            }
            None => false,
        }
    }

    /// Insert before the named rule, or append when the name is unknown.
    pub fn insert_before_or_push(&mut self, name: &str, rule: Box<dyn Rule>) {
        match self.position(name) {
            Some(index) => self.rules.insert(index, rule),
            None => self.rules.push(rule),
        }
    }

    /// Index of the rule named `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The standard DFM block chain. See the module docs for the ordering rationale.
pub fn dfm_block_rules() -> RuleChain {
    let mut chain = RuleChain::new();
    chain.push(Box::new(NewlineBlockRule));
    chain.push(Box::new(NoteBlockRule));
    chain.push(Box::new(BlockquoteBlockRule));
    chain.push(Box::new(ParagraphBlockRule));
    chain
}

/// The standard DFM inline chain.
pub fn dfm_inline_rules() -> RuleChain {
    let mut chain = RuleChain::new();
    chain.push(Box::new(LinkInlineRule));
    chain.push(Box::new(AutolinkInlineRule));
    chain.push(Box::new(TextInlineRule));
    chain
}
