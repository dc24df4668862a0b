//! Token model
//!
//!     Tokens form an owned, immutable tree. Container variants (block quote, note
//!     block, paragraph) hold their children by value; rewriting builds new nodes
//!     rather than mutating in place, which is what makes the rewrite chain safe to
//!     compose in any order among independent rewriters.
//!
//!     Every variant embeds a [TokenInfo] with three provenance fields:
//!
//!         - the name of the rule that produced it, used for diagnostics and for
//!           rewriters that dispatch on token origin
//!         - the raw source span the rule consumed, the basis of the round-trip
//!           invariant (top-level raw spans concatenate back to the source)
//!         - the byte offset where the match started, for line-number attribution
//!
//!     Paragraph content is a two-state [InlineSpan]: the block phase leaves it raw,
//!     the inline phase resolves it to tokens. The engine guarantees that no tree
//!     returned from a parse still carries a raw span, so consumers can rely on
//!     containers holding fully resolved tokens only.
//!
//!     All tokens serialize with serde so the host pipeline can persist or inspect
//!     trees without reaching into the engine.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Provenance fields common to every token variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    /// Name of the rule that produced this token.
    pub rule: String,
    /// The exact source span the rule consumed.
    pub raw: String,
    /// Byte offset of the match within the span buffer it was parsed from.
    pub offset: usize,
}

impl TokenInfo {
    pub fn new(rule: &str, raw: &str, offset: usize) -> Self {
        TokenInfo {
            rule: rule.to_string(),
            raw: raw.to_string(),
            offset,
        }
    }
}

/// The closed set of DFM note keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteType {
    Note,
    Warning,
    Tip,
    Important,
    Caution,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Note => "NOTE",
            NoteType::Warning => "WARNING",
            NoteType::Tip => "TIP",
            NoteType::Important => "IMPORTANT",
            NoteType::Caution => "CAUTION",
        }
    }
}

impl FromStr for NoteType {
    type Err = ();

    /// Case-insensitive; the note rule matches keywords in any casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KEYWORDS: [(&str, NoteType); 5] = [
            ("NOTE", NoteType::Note),
            ("WARNING", NoteType::Warning),
            ("TIP", NoteType::Tip),
            ("IMPORTANT", NoteType::Important),
            ("CAUTION", NoteType::Caution),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| s.eq_ignore_ascii_case(keyword))
            .map(|(_, note_type)| *note_type)
            .ok_or(())
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plain text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextToken {
    pub info: TokenInfo,
    pub content: String,
}

/// One or more blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewlineToken {
    pub info: TokenInfo,
}

/// Paragraph content: raw after the block phase, resolved after the inline phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InlineSpan {
    Raw(String),
    Parsed(Vec<Token>),
}

/// A paragraph of consecutive non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphToken {
    pub info: TokenInfo,
    pub content: InlineSpan,
}

/// A block quote container; children are fully parsed block tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockquoteToken {
    pub info: TokenInfo,
    pub children: Vec<Token>,
}

/// A DFM note marker line, e.g. `[!WARNING]`, recognized inside a block quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteToken {
    pub info: TokenInfo,
    pub note_type: NoteType,
}

/// A block quote specialized into a typed note container by the note rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteBlockToken {
    pub info: TokenInfo,
    pub note_type: NoteType,
    pub children: Vec<Token>,
}

/// An anchor: display text, optional title, target href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkToken {
    pub info: TokenInfo,
    pub text: String,
    pub title: Option<String>,
    pub href: String,
}

/// The closed token union produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Text(TextToken),
    Newline(NewlineToken),
    Paragraph(ParagraphToken),
    Blockquote(BlockquoteToken),
    Note(NoteToken),
    NoteBlock(NoteBlockToken),
    Link(LinkToken),
}

impl Token {
    pub fn info(&self) -> &TokenInfo {
        match self {
            Token::Text(t) => &t.info,
            Token::Newline(t) => &t.info,
            Token::Paragraph(t) => &t.info,
            Token::Blockquote(t) => &t.info,
            Token::Note(t) => &t.info,
            Token::NoteBlock(t) => &t.info,
            Token::Link(t) => &t.info,
        }
    }

    /// The raw source span this token consumed.
    pub fn raw(&self) -> &str {
        &self.info().raw
    }

    /// Name of the rule that produced this token.
    pub fn rule(&self) -> &str {
        &self.info().rule
    }

    pub fn offset(&self) -> usize {
        self.info().offset
    }

    /// Children of container variants; leaves return `None`. A paragraph whose
    /// inline span is still raw also returns `None`.
    pub fn children(&self) -> Option<&[Token]> {
        match self {
            Token::Blockquote(t) => Some(&t.children),
            Token::NoteBlock(t) => Some(&t.children),
            Token::Paragraph(ParagraphToken {
                content: InlineSpan::Parsed(children),
                ..
            }) => Some(children),
            _ => None,
        }
    }

    /// Flattened display text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Token::Text(t) => t.content.clone(),
            Token::Newline(t) => t.info.raw.clone(),
            Token::Note(t) => t.info.raw.clone(),
            Token::Link(t) => t.text.clone(),
            Token::Paragraph(t) => match &t.content {
                InlineSpan::Raw(text) => text.clone(),
                InlineSpan::Parsed(children) => {
                    children.iter().map(Token::text_content).collect()
                }
            },
            Token::Blockquote(t) => t.children.iter().map(Token::text_content).collect(),
            Token::NoteBlock(t) => t.children.iter().map(Token::text_content).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_type_parses_case_insensitively() {
        assert_eq!(NoteType::from_str("note"), Ok(NoteType::Note));
        assert_eq!(NoteType::from_str("Warning"), Ok(NoteType::Warning));
        assert_eq!(NoteType::from_str("CAUTION"), Ok(NoteType::Caution));
        assert_eq!(NoteType::from_str("HINT"), Err(()));
    }

    #[test]
    fn note_type_round_trips_through_as_str() {
        for note_type in [
            NoteType::Note,
            NoteType::Warning,
            NoteType::Tip,
            NoteType::Important,
            NoteType::Caution,
        ] {
            assert_eq!(NoteType::from_str(note_type.as_str()), Ok(note_type));
        }
    }

    #[test]
    fn tokens_serialize_for_the_host_pipeline() {
        let token = Token::Link(LinkToken {
            info: TokenInfo::new("Inline.Gfm.Url", "http://example.com", 6),
            text: "http://example.com".to_string(),
            title: None,
            href: "http://example.com".to_string(),
        });
        let json = serde_json::to_string(&token).expect("serialization failed");
        assert!(json.contains("\"rule\":\"Inline.Gfm.Url\""));
        assert!(json.contains("\"href\":\"http://example.com\""));
    }

    #[test]
    fn text_content_flattens_containers() {
        let quote = Token::Blockquote(BlockquoteToken {
            info: TokenInfo::new("Block.Blockquote", "> a b\n", 0),
            children: vec![Token::Paragraph(ParagraphToken {
                info: TokenInfo::new("Block.Paragraph", "a b\n", 0),
                content: InlineSpan::Parsed(vec![Token::Text(TextToken {
                    info: TokenInfo::new("Inline.Text", "a b", 0),
                    content: "a b".to_string(),
                })]),
            })],
        });
        assert_eq!(quote.text_content(), "a b");
    }
}
