//! Unicode classification predicates.
//!
//! Three predicates back the scanner's non-ASCII dispatch: [`is_whitespace`],
//! [`is_identifier_start`], and [`is_identifier_part`].  Code points below
//! 128 short-circuit to ASCII rules; everything else binary-searches the
//! sorted span tables in [`unicode_data`](super::unicode_data).

use super::unicode_data::{IDENTIFIER_SPANS, IdentifierSpan, WHITESPACE_SPANS, WhitespaceSpan};

fn search_whitespace(code: u32) -> Option<&'static WhitespaceSpan> {
    let mut left = 0usize;
    let mut right = WHITESPACE_SPANS.len();
    while left < right {
        let mid = (left + right) / 2;
        let span = &WHITESPACE_SPANS[mid];
        if code < span.id {
            right = mid;
        } else if code <= span.id + span.length {
            return Some(span);
        } else {
            left = mid + 1;
        }
    }
    None
}

fn search_identifier(code: u32) -> Option<&'static IdentifierSpan> {
    let mut left = 0usize;
    let mut right = IDENTIFIER_SPANS.len();
    while left < right {
        let mid = (left + right) / 2;
        let span = &IDENTIFIER_SPANS[mid];
        if code < span.id {
            right = mid;
        } else if code <= span.id + span.length {
            return Some(span);
        } else {
            left = mid + 1;
        }
    }
    None
}

/// Returns `true` for ECMAScript `WhiteSpace` code points (Zs plus TAB, VT,
/// FF, and the BOM).  Line terminators are not whitespace here; see
/// [`is_newline_char`].
pub fn is_whitespace(code: u32) -> bool {
    search_whitespace(code).is_some()
}

/// Returns `true` for code points that may start an identifier.
pub fn is_identifier_start(code: u32) -> bool {
    if code < 128 {
        return (code >= 'a' as u32 && code <= 'z' as u32)
            || (code >= 'A' as u32 && code <= 'Z' as u32)
            || code == '_' as u32
            || code == '$' as u32;
    }
    search_identifier(code).is_some_and(|span| span.start)
}

/// Returns `true` for code points that may continue an identifier.
pub fn is_identifier_part(code: u32) -> bool {
    if code < 128 {
        return (code >= 'a' as u32 && code <= 'z' as u32)
            || (code >= 'A' as u32 && code <= 'Z' as u32)
            || (code >= '0' as u32 && code <= '9' as u32)
            || code == '_' as u32
            || code == '$' as u32;
    }
    search_identifier(code).is_some()
}

/// Returns `true` for ECMAScript `LineTerminator` code points: `\n`, `\r`,
/// U+2028 LINE SEPARATOR, U+2029 PARAGRAPH SEPARATOR.
pub fn is_newline_char(code: u32) -> bool {
    code == '\n' as u32 || code == '\r' as u32 || code == 0x2028 || code == 0x2029
}
