//! Parse errors
//!
//!     The engine distinguishes rule-set defects from rejected matches. A rule whose
//!     pattern matched but whose post-condition failed (an ill-formed URI, say) simply
//!     declines by returning no token and the engine moves on to the next rule; that
//!     path never surfaces here. The variants below are fatal for the current
//!     document: the host build pipeline is expected to catch them per document, log,
//!     and continue with the rest of the build.

use thiserror::Error;

/// Fatal errors aborting the parse of the current document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No rule in the chain matched a prefix of the remaining input. This signals a
    /// rule set without catch-all coverage, not bad user input; the standard DFM
    /// chains are total and never produce it.
    #[error("no rule matched the remaining input at offset {offset}; the rule chain lacks catch-all coverage")]
    GrammarIncomplete { offset: usize },

    /// A rule returned a token whose raw span is empty or exceeds the remaining
    /// input. Either way the engine cannot advance soundly, so the rule is defective.
    #[error("rule '{rule}' violated the consumption invariant at offset {offset}")]
    ConsumptionViolation { rule: String, offset: usize },

    /// Recursive block parsing crossed the configured depth limit.
    #[error("nesting exceeds the maximum depth of {max_depth} at offset {offset}")]
    ExcessiveNesting { offset: usize, max_depth: usize },
}
