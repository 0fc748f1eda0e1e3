//! Error types for the rotor scanner.
//!
//! Lexical errors are reported **in-band** on the current
//! [`ScanResult`](crate::scanner::ScanResult): there is no exception flow and
//! [`Scanner::next`](crate::scanner::Scanner::next) never returns a `Result`.
//! The two enums here are the payloads of the result's `error` and
//! `strict_error` channels.

use thiserror::Error;

/// A hard lexical error.
///
/// When one of these is recorded the token's kind is forced to
/// [`Token::Error`](crate::scanner::Token::Error).  Scanning may continue from
/// the next code point if the caller chooses, but the usual policy is to stop
/// at the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A code point that cannot start any token.
    #[error("unexpected character")]
    UnexpectedCharacter,

    /// `\x` not followed by exactly two hex digits.
    #[error("invalid hexadecimal escape sequence")]
    InvalidHexEscape,

    /// `\u` not followed by four hex digits or a braced `{1–6}` hex sequence
    /// with a value of at most U+10FFFF.
    #[error("invalid Unicode escape sequence")]
    InvalidUnicodeEscape,

    /// A `\u` escape inside an identifier that is malformed or decodes to a
    /// code point that cannot appear in an identifier.
    #[error("invalid Unicode escape in identifier")]
    InvalidIdentifierEscape,

    /// A string literal terminated by a raw line terminator or end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A block comment that reaches end of input before `*/`.
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// A template literal that reaches end of input.
    #[error("unterminated template literal")]
    UnterminatedTemplate,

    /// A regular-expression literal terminated by a raw line terminator or
    /// end of input.
    #[error("unterminated regular expression literal")]
    UnterminatedRegexp,

    /// `e`/`E` in a numeric literal with no following digits.
    #[error("missing digits in exponent")]
    MissingExponent,

    /// `0o`/`0O` with no following octal digit.
    #[error("missing digits in octal literal")]
    InvalidOctalLiteral,

    /// `0x`/`0X` with no following hex digit.
    #[error("missing digits in hexadecimal literal")]
    InvalidHexLiteral,

    /// `0b`/`0B` with no following binary digit.
    #[error("missing digits in binary literal")]
    InvalidBinaryLiteral,

    /// A numeric literal directly followed by an identifier-start code point
    /// (e.g. `3in`, `0x1z`).
    #[error("identifier character directly after numeric literal")]
    InvalidNumberSuffix,
}

/// A construct that is valid in sloppy mode but a lexical error under strict
/// mode.
///
/// Recording one of these does **not** downgrade the token kind; the
/// embedding parser promotes it to a hard error at its discretion once it has
/// determined that the surrounding code is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrictError {
    /// A legacy octal escape sequence in a string literal (`'\012'`).
    #[error("octal escape sequences are not allowed in strict mode")]
    LegacyOctalEscape,

    /// A legacy octal integer literal (`0777`).
    #[error("octal literals are not allowed in strict mode")]
    LegacyOctalNumber,
}
