//! String helpers shared by inline rules
//!
//!     Escaping targets HTML embedding: the autolink rule escapes the captured URL
//!     text before validation so the produced token is safe to drop into an href or
//!     anchor body without further processing by the renderer.

use url::Url;

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Whether `text` is a syntactically well-formed absolute or relative URI.
///
/// Absolute references must parse as a full URL. Scheme-less references are
/// accepted as relative as long as they carry no whitespace or angle brackets,
/// which is all the well-formedness a relative reference has to offer.
pub fn is_well_formed_uri(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text
        .chars()
        .any(|ch| ch.is_whitespace() || ch == '<' || ch == '>')
    {
        return false;
    }
    match Url::parse(text) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
