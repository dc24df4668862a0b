//! Parse context
//!
//!     The context carries the mutable per-parse state rules consult before matching.
//!     There are two independent scopes, one per tokenization phase:
//!
//!         - Block scope: "inside a block quote". The DFM note rule only fires when
//!           this is set, which is how `[!NOTE]` outside a quote falls through to the
//!           plain paragraph rule.
//!         - Inline scope: "inside a link". The link and autolink rules refuse to
//!           match while this is set, preventing nested anchors.
//!
//!     Scope variables default to false, so a lookup never reads undefined state.
//!     Rules that enter a recursive sub-parse save the current value, set their own,
//!     and restore the saved value when the recursion returns; the symmetry keeps
//!     sibling constructs isolated from each other.
//!
//!     The context also counts nesting depth. The engine increments it on every
//!     recursive span parse and aborts with an excessive-nesting error once the
//!     configured maximum is crossed, which is the safeguard against stack exhaustion
//!     on adversarial input.
//!
//!     A fresh context is created per top-level parse call and discarded when parsing
//!     completes; nothing here is shared between documents.

/// Context variables consulted by block-phase rules.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockScope {
    /// True while parsing the inner text of a block quote.
    pub in_blockquote: bool,
}

/// Context variables consulted by inline-phase rules.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InlineScope {
    /// True while parsing the label text of a link.
    pub in_link: bool,
}

/// Mutable per-parse state: the two rule scopes plus the nesting depth.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseContext {
    pub block: BlockScope,
    pub inline: InlineScope,
    depth: usize,
}

impl ParseContext {
    pub fn new() -> Self {
        ParseContext::default()
    }

    /// Current nesting depth. The top-level span parse counts as depth one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter_nested(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn leave_nested(&mut self) {
        debug_assert!(self.depth > 0, "unbalanced nesting depth");
        self.depth -= 1;
    }
}
