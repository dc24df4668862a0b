//! Engine-level property tests
//!
//! The contracts that hold for any rule chain: round-trip reconstruction from
//! raw spans, termination through consumption accounting, first-match-wins
//! dispatch, context scoping, and the three fatal error conditions.

use dfm_parser::dfm::rules::NewlineBlockRule;
use dfm_parser::dfm::testing::{concat_raw, expect_blockquote, parse_dfm};
use dfm_parser::dfm::{
    Engine, ParseContext, ParseError, Rule, RuleChain, Source, TextToken, Token, TokenInfo,
};
use proptest::prelude::*;

/// Consumes exactly one character, labelling the token with its own name.
struct OneCharRule(&'static str);

impl Rule for OneCharRule {
    fn name(&self) -> &'static str {
        self.0
    }

    fn try_match(
        &self,
        _engine: &Engine,
        _context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        let text = source.remaining();
        let Some(first) = text.chars().next() else {
            return Ok(None);
        };
        let raw = &text[..first.len_utf8()];
        Ok(Some(Token::Text(TextToken {
            info: TokenInfo::new(self.0, raw, source.offset()),
            content: raw.to_string(),
        })))
    }
}

/// A broken rule: matches everything but consumes nothing.
struct ZeroWidthRule;

impl Rule for ZeroWidthRule {
    fn name(&self) -> &'static str {
        "Toy.ZeroWidth"
    }

    fn try_match(
        &self,
        _engine: &Engine,
        _context: &mut ParseContext,
        source: Source<'_>,
    ) -> Result<Option<Token>, ParseError> {
        Ok(Some(Token::Text(TextToken {
            info: TokenInfo::new(self.name(), "", source.offset()),
            content: String::new(),
        })))
    }
}

fn engine_with_block_rules(rules: Vec<Box<dyn Rule>>) -> Engine {
    let mut chain = RuleChain::new();
    for rule in rules {
        chain.push(rule);
    }
    Engine::builder().block_rules(chain).build()
}

#[test]
fn earlier_rules_win_over_overlapping_later_ones() {
    let a_first = engine_with_block_rules(vec![
        Box::new(OneCharRule("Toy.A")),
        Box::new(OneCharRule("Toy.B")),
    ]);
    let tokens = a_first.parse("xy").expect("parse failed");
    assert!(tokens.iter().all(|token| token.rule() == "Toy.A"));

    let b_first = engine_with_block_rules(vec![
        Box::new(OneCharRule("Toy.B")),
        Box::new(OneCharRule("Toy.A")),
    ]);
    let tokens = b_first.parse("xy").expect("parse failed");
    assert!(tokens.iter().all(|token| token.rule() == "Toy.B"));
}

#[test]
fn quote_gated_rules_never_fire_at_top_level() {
    let top_level = parse_dfm("[!NOTE]\n");
    assert!(top_level.iter().all(|token| !matches!(token, Token::Note(_))));

    let quoted = parse_dfm("> [!NOTE]\n");
    let quote = expect_blockquote(&quoted[0]);
    assert!(matches!(quote.children[0], Token::Note(_)));
}

#[test]
fn an_exhausted_chain_is_a_grammar_error() {
    // The newline rule alone cannot account for prose.
    let engine = engine_with_block_rules(vec![Box::new(NewlineBlockRule)]);
    match engine.parse("\n\nprose") {
        Err(ParseError::GrammarIncomplete { offset }) => assert_eq!(offset, 2),
        other => panic!("expected a grammar error, got {:?}", other),
    }
}

#[test]
fn a_zero_width_match_is_a_consumption_violation() {
    let engine = engine_with_block_rules(vec![Box::new(ZeroWidthRule)]);
    match engine.parse("anything") {
        Err(ParseError::ConsumptionViolation { rule, offset }) => {
            assert_eq!(rule, "Toy.ZeroWidth");
            assert_eq!(offset, 0);
        }
        other => panic!("expected a consumption violation, got {:?}", other),
    }
}

#[test]
fn nesting_beyond_the_limit_is_rejected() {
    let source = format!("{}deep\n", "> ".repeat(40));
    match Engine::dfm().parse(&source) {
        Err(ParseError::ExcessiveNesting { max_depth, .. }) => assert_eq!(max_depth, 32),
        other => panic!("expected a nesting error, got {:?}", other),
    }
}

#[test]
fn the_depth_limit_is_configurable() {
    let shallow = Engine::builder()
        .block_rules(dfm_parser::dfm::dfm_block_rules())
        .inline_rules(dfm_parser::dfm::dfm_inline_rules())
        .max_depth(2)
        .build();
    assert!(shallow.parse("> one level\n").is_ok());
    assert!(matches!(
        shallow.parse("> > two levels\n"),
        Err(ParseError::ExcessiveNesting { max_depth: 2, .. })
    ));
}

fn document_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z ]{0,16}\n",
        Just("> quoted line\n".to_string()),
        Just("> [!NOTE]\n> noted\n".to_string()),
        Just("[!NOTE]\n".to_string()),
        Just("\n".to_string()),
        Just("see [a](http://x \"t\") here\n".to_string()),
        Just("go to http://example.com now\n".to_string()),
    ]
}

proptest! {
    /// Concatenating top-level raw spans reconstructs the source exactly, and
    /// parsing terminates, for documents assembled from grammar fragments.
    #[test]
    fn fragment_documents_round_trip(fragments in proptest::collection::vec(document_fragment(), 0..8)) {
        let source: String = fragments.concat();
        let tokens = Engine::dfm().parse(&source).expect("parse failed");
        prop_assert_eq!(concat_raw(&tokens), source);
    }

    /// The same holds for arbitrary printable input; only the nesting guard may
    /// legitimately abort, on pathologically deep quote chains.
    #[test]
    fn printable_documents_round_trip(source in "[ -~\n]{0,200}") {
        match Engine::dfm().parse(&source) {
            Ok(tokens) => prop_assert_eq!(concat_raw(&tokens), source),
            Err(ParseError::ExcessiveNesting { .. }) => {}
            Err(error) => prop_assert!(false, "unexpected error: {}", error),
        }
    }
}
