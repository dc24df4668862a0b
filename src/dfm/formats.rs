//! Treeviz formatter for token trees
//!
//!     Treeviz is a one-line-per-node rendering of a token tree, meant for quick
//!     visual scanning in test failures and debug logs. Structure is encoded as
//!     indentation, two spaces per level of nesting, and each line is
//!
//!         <indentation><icon><space><label>
//!
//!     with the label truncated to 30 characters. Newlines inside labels are shown
//!     as `\n` so every node stays on one line.
//!
//! Icons
//!
//!     Paragraph: ¶
//!     Text: ◦
//!     Newline: ↵
//!     Blockquote: ❯
//!     Note marker and note block: ‼
//!     Link: ⊕

use crate::dfm::token::{InlineSpan, Token};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn one_line(s: &str) -> String {
    s.replace('\n', "\\n").replace('\r', "\\r")
}

/// Render a forest of sibling tokens as a treeviz string.
pub fn to_treeviz_str(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        append_token(&mut result, token, 0);
    }
    result
}

fn append_token(result: &mut String, token: &Token, level: usize) {
    let (icon, label) = match token {
        Token::Paragraph(paragraph) => ('¶', match &paragraph.content {
            InlineSpan::Raw(text) => text.clone(),
            InlineSpan::Parsed(_) => token.text_content(),
        }),
        Token::Text(text) => ('◦', text.content.clone()),
        Token::Newline(newline) => ('↵', newline.info.raw.clone()),
        Token::Blockquote(_) => ('❯', token.text_content()),
        Token::Note(note) => ('‼', note.note_type.to_string()),
        Token::NoteBlock(note_block) => ('‼', note_block.note_type.to_string()),
        Token::Link(link) => ('⊕', format!("{} -> {}", link.text, link.href)),
    };
    let label = truncate(&one_line(&label), MAX_LABEL_CHARS);
    result.push_str(&"  ".repeat(level));
    result.push(icon);
    result.push(' ');
    result.push_str(&label);
    result.push('\n');

    if let Some(children) = token.children() {
        for child in children {
            append_token(result, child, level + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfm::token::{
        BlockquoteToken, NoteBlockToken, NoteType, ParagraphToken, TextToken, TokenInfo,
    };

    fn text(content: &str) -> Token {
        Token::Text(TextToken {
            info: TokenInfo::new("Inline.Text", content, 0),
            content: content.to_string(),
        })
    }

    fn paragraph(content: &str) -> Token {
        Token::Paragraph(ParagraphToken {
            info: TokenInfo::new("Block.Paragraph", content, 0),
            content: InlineSpan::Parsed(vec![text(content)]),
        })
    }

    #[test]
    fn indents_two_spaces_per_level() {
        let quote = Token::Blockquote(BlockquoteToken {
            info: TokenInfo::new("Block.Blockquote", "> hello\n", 0),
            children: vec![paragraph("hello")],
        });
        assert_eq!(
            to_treeviz_str(&[quote]),
            "❯ hello\n  ¶ hello\n    ◦ hello\n"
        );
    }

    #[test]
    fn truncates_long_labels() {
        let long = "a".repeat(40);
        let rendered = to_treeviz_str(&[text(&long)]);
        assert_eq!(rendered, format!("◦ {}...\n", "a".repeat(30)));
    }

    #[test]
    fn escapes_newlines_in_labels() {
        let rendered = to_treeviz_str(&[paragraph("two\nlines")]);
        assert!(rendered.starts_with("¶ two\\nlines\n"));
    }

    #[test]
    fn note_blocks_show_their_keyword() {
        let note_block = Token::NoteBlock(NoteBlockToken {
            info: TokenInfo::new("Block.Blockquote", "> [!TIP]\n> t\n", 0),
            note_type: NoteType::Tip,
            children: vec![paragraph("t")],
        });
        assert_eq!(to_treeviz_str(&[note_block]), "‼ TIP\n  ¶ t\n    ◦ t\n");
    }
}
