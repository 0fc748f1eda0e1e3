//! Streaming ECMAScript lexical scanner.
//!
//! - [`cursor`] — code-point cursor capability ([`CodePointSource`]) and the
//!   stock [`Cursor`] over `&[u32]`.
//! - [`token`] — the flat [`Token`] enumeration and its range classifiers.
//! - [`start_table`] — 128-entry ASCII start-dispatch table.
//! - [`trie`] — punctuator and keyword matcher.
//! - [`unicode`] / [`unicode_data`] — Unicode classification predicates.
//!
//! See [`Scanner`] for the main entry point.

/// Code-point cursor capability trait and stock slice cursor.
pub mod cursor;
/// 128-entry ASCII start-dispatch table.
pub mod start_table;
/// The flat token enumeration and its range classifiers.
pub mod token;
/// Punctuator and keyword matcher.
pub mod trie;
/// Unicode classification predicates.
pub mod unicode;
/// Sorted span tables backing the Unicode predicates.
pub mod unicode_data;

pub use cursor::{CodePointSource, Cursor, SourcePosition};
pub use token::{Token, is_contextual_keyword, is_keyword, is_strict_reserved_word};

use bitflags::bitflags;

use crate::error::{ScanError, StrictError};
use start_table::{TOKEN_START_TABLE, TokenStartType};
use trie::TokenTrie;
use unicode::{is_identifier_part, is_identifier_start, is_newline_char, is_whitespace};

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// The lexical context for one [`Scanner::next`] call.
///
/// The scanner does not track grammatical position itself; the caller (a
/// parser) is the authority on whether `/` is a division operator and
/// whether `}` resumes a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// A `/` starts a regular-expression literal.  The default.
    #[default]
    Expression,
    /// A `/` starts a divide (or divide-assign) operator.
    Div,
    /// A `}` resumes a template literal after an interpolation.
    TemplateString,
}

// ─────────────────────────────────────────────────────────────────────────────
// ScanResult
// ─────────────────────────────────────────────────────────────────────────────

bitflags! {
    /// Per-token boolean metadata.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        /// At least one line terminator was consumed between the previous
        /// non-comment token and this one.
        const NEWLINE_BEFORE = 1 << 0;
        /// The numeric literal carried a trailing BigInt `n` suffix.
        const BIGINT_SUFFIX = 1 << 1;
    }
}

/// The span and metadata of the most recently scanned token.
///
/// Reused in place across [`Scanner::next`] calls; copy it out if you need
/// to keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// The token kind.
    pub token: Token,
    /// Code-point offset of the first code point of the token.
    pub start: SourcePosition,
    /// Code-point offset one past the last code point of the token.
    pub end: SourcePosition,
    /// Boolean metadata; see [`TokenFlags`].
    pub flags: TokenFlags,
    /// The hard lexical error, when `token` is [`Token::Error`].
    pub error: Option<ScanError>,
    /// A construct that is an error only under strict mode.  Orthogonal to
    /// `error`; does not downgrade the token kind.
    pub strict_error: Option<StrictError>,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            token: Token::Error,
            start: 0,
            end: 0,
            flags: TokenFlags::empty(),
            error: None,
            strict_error: None,
        }
    }
}

impl ScanResult {
    /// `true` when at least one line terminator was consumed since the
    /// previous non-comment token.
    pub fn newline_before(&self) -> bool {
        self.flags.contains(TokenFlags::NEWLINE_BEFORE)
    }

    /// `true` when a numeric literal carried a BigInt `n` suffix.
    pub fn bigint_suffix(&self) -> bool {
        self.flags.contains(TokenFlags::BIGINT_SUFFIX)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming ECMAScript lexer.
///
/// Produces one token per [`next`](Scanner::next) call from a sequence of
/// already-decoded code points.  Whitespace is consumed transparently;
/// comments are surfaced so the caller can elect to forward or drop them.
/// A scanner is single-use and not thread-safe; the cursor is consumed in
/// place.
///
/// # Example
///
/// ```
/// use rotor_core::scanner::{Context, Scanner, Token};
///
/// let input: Vec<u32> = "let x = 42;".chars().map(|c| c as u32).collect();
/// let mut sc = Scanner::new(&input);
/// loop {
///     let t = sc.next(Context::Expression);
///     if t == Token::End {
///         break;
///     }
///     println!("{:?} at {}..{}", t, sc.result().start, sc.result().end);
/// }
/// ```
pub struct Scanner<S: CodePointSource> {
    source: S,
    result: ScanResult,
}

impl<'src> Scanner<Cursor<'src>> {
    /// Create a scanner over a decoded code-point slice.
    pub fn new(input: &'src [u32]) -> Self {
        Self::with_source(Cursor::new(input))
    }

    /// Scan `input` to exhaustion in [`Context::Expression`], collecting
    /// every result including the final [`Token::End`].  Stops after the
    /// first [`Token::Error`].
    ///
    /// A convenience for tests and tools; parsers drive [`next`] one token
    /// at a time with the proper context.
    ///
    /// [`next`]: Scanner::next
    pub fn tokenize_all(input: &'src [u32]) -> Vec<ScanResult> {
        let mut scanner = Scanner::new(input);
        let mut results = Vec::new();
        loop {
            let t = scanner.next(Context::Expression);
            results.push(*scanner.result());
            if t == Token::End || t == Token::Error {
                return results;
            }
        }
    }
}

// The trie drives the scanner through the same capability the scanner uses
// for its own input, so generics stop at the one `S` parameter.
impl<S: CodePointSource> CodePointSource for Scanner<S> {
    fn can_shift(&self) -> bool {
        self.source.can_shift()
    }

    fn peek(&self) -> u32 {
        self.source.peek()
    }

    fn peek2(&self) -> u32 {
        self.source.peek2()
    }

    fn shift(&mut self) -> u32 {
        self.source.shift()
    }

    fn advance(&mut self) {
        self.source.advance();
    }

    fn position(&self) -> SourcePosition {
        self.source.position()
    }
}

impl<S: CodePointSource> Scanner<S> {
    /// Create a scanner over any [`CodePointSource`].
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            result: ScanResult::default(),
        }
    }

    /// The span and metadata of the most recent token.
    pub fn result(&self) -> &ScanResult {
        &self.result
    }

    /// Scan and return the next non-whitespace token.
    ///
    /// Returns [`Token::End`] idempotently once the input is exhausted.
    /// On [`Token::Error`] the cause is in [`ScanResult::error`]; scanning
    /// may continue from the next code point if the caller chooses.
    pub fn next(&mut self, context: Context) -> Token {
        if self.result.token != Token::Comment {
            self.result.flags.remove(TokenFlags::NEWLINE_BEFORE);
        }
        self.result.flags.remove(TokenFlags::BIGINT_SUFFIX);
        self.result.error = None;
        self.result.strict_error = None;

        loop {
            self.result.start = self.source.position();
            let mut token = self.start_token(context);
            if self.result.error.is_some() {
                token = Token::Error;
            }
            if token != Token::Whitespace {
                self.result.token = token;
                self.result.end = self.source.position();
                return token;
            }
        }
    }

    fn set_error(&mut self, error: ScanError) {
        self.result.error = Some(error);
    }

    // ── Start dispatch ──────────────────────────────────────────────────────

    fn start_token(&mut self, context: Context) -> Token {
        if !self.can_shift() {
            return Token::End;
        }

        let cp = self.shift();
        if cp < 128 {
            match TOKEN_START_TABLE[cp as usize] {
                TokenStartType::Punctuator => TokenTrie::match_punctuator(self, cp),
                TokenStartType::Whitespace => Token::Whitespace,
                TokenStartType::Newline => self.newline(cp),
                TokenStartType::String => self.string(cp),
                TokenStartType::Identifier => self.identifier(cp),

                TokenStartType::Dot => {
                    if is_ascii_digit(self.peek()) {
                        self.number(cp)
                    } else {
                        TokenTrie::match_punctuator(self, cp)
                    }
                }

                TokenStartType::Slash => {
                    let next = self.peek();
                    if next == u32::from(b'/') {
                        self.line_comment()
                    } else if next == u32::from(b'*') {
                        self.block_comment()
                    } else if context == Context::Div {
                        TokenTrie::match_punctuator(self, cp)
                    } else {
                        self.regexp()
                    }
                }

                TokenStartType::Zero => match self.peek() {
                    n if n == u32::from(b'x') || n == u32::from(b'X') => self.hex_number(),
                    n if n == u32::from(b'b') || n == u32::from(b'B') => self.binary_number(),
                    n if n == u32::from(b'o') || n == u32::from(b'O') => self.octal_number(),
                    n if (u32::from(b'0')..=u32::from(b'7')).contains(&n) => {
                        self.legacy_octal_number()
                    }
                    _ => self.number(cp),
                },

                TokenStartType::Digit => self.number(cp),
                TokenStartType::Backtick => self.template(cp),

                TokenStartType::RightBrace => {
                    if context == Context::TemplateString {
                        self.template(cp)
                    } else {
                        TokenTrie::match_punctuator(self, cp)
                    }
                }

                TokenStartType::Error => {
                    self.set_error(ScanError::UnexpectedCharacter);
                    Token::Error
                }
            }
        } else if is_newline_char(cp) {
            self.newline(cp)
        } else if is_whitespace(cp) {
            Token::Whitespace
        } else if is_identifier_start(cp) {
            self.identifier(cp)
        } else {
            self.set_error(ScanError::UnexpectedCharacter);
            Token::Error
        }
    }

    fn newline(&mut self, cp: u32) -> Token {
        // \r\n counts as a single terminator.
        if cp == u32::from(b'\r') && self.peek() == u32::from(b'\n') {
            self.advance();
        }
        self.result.flags.insert(TokenFlags::NEWLINE_BEFORE);
        Token::Whitespace
    }

    // ── Comments ────────────────────────────────────────────────────────────

    fn line_comment(&mut self) -> Token {
        self.advance(); // second '/'
        while self.can_shift() && !is_newline_char(self.peek()) {
            self.advance();
        }
        Token::Comment
    }

    fn block_comment(&mut self) -> Token {
        self.advance(); // '*'
        loop {
            if !self.can_shift() {
                self.set_error(ScanError::UnterminatedComment);
                break;
            }
            let cp = self.shift();
            if is_newline_char(cp) {
                if cp == u32::from(b'\r') && self.peek() == u32::from(b'\n') {
                    self.advance();
                }
                self.result.flags.insert(TokenFlags::NEWLINE_BEFORE);
            } else if cp == u32::from(b'*') && self.peek() == u32::from(b'/') {
                self.advance();
                break;
            }
        }
        Token::Comment
    }

    // ── Identifiers ─────────────────────────────────────────────────────────

    fn identifier(&mut self, cp: u32) -> Token {
        let mut token = if cp == u32::from(b'\\') {
            // Identifier led by a `\u` escape; never a keyword.
            if !self.identifier_escape() {
                return Token::Error;
            }
            Token::Identifier
        } else {
            TokenTrie::match_keyword(self, cp)
        };

        loop {
            let n = self.peek();
            if n == u32::from(b'\\') {
                self.advance();
                if !self.identifier_escape() {
                    return Token::Error;
                }
                token = Token::Identifier;
            } else if is_identifier_part(n) {
                // The identifier continues past the trie match; a keyword
                // prefix (`iffy`) downgrades to a plain identifier.
                self.advance();
                token = Token::Identifier;
            } else {
                break;
            }
        }

        if token == Token::Error {
            Token::Identifier
        } else {
            token
        }
    }

    /// After the backslash: require `u` and an escape that decodes to an
    /// identifier code point.  Records the error on failure.
    fn identifier_escape(&mut self) -> bool {
        if self.peek() == u32::from(b'u') {
            self.advance();
            if let Some(v) = self.unicode_escape()
                && is_identifier_part(v)
            {
                return true;
            }
        }
        self.set_error(ScanError::InvalidIdentifierEscape);
        false
    }

    // ── Strings ─────────────────────────────────────────────────────────────

    fn string(&mut self, delim: u32) -> Token {
        while self.can_shift() {
            let n = self.shift();
            if n == delim {
                return Token::String;
            } else if n == u32::from(b'\\') {
                if let Err(e) = self.escape(true) {
                    self.set_error(e);
                }
            } else if is_newline_char(n) {
                break;
            }
        }
        self.set_error(ScanError::UnterminatedString);
        Token::String
    }

    // ── Templates ───────────────────────────────────────────────────────────

    /// `open` is `` ` `` for the initial fragment or `}` when resuming after
    /// an interpolation.
    fn template(&mut self, open: u32) -> Token {
        let head = open == u32::from(b'`');
        while self.can_shift() {
            let n = self.shift();
            if n == u32::from(b'`') {
                return if head {
                    Token::TemplateBasic
                } else {
                    Token::TemplateTail
                };
            } else if n == u32::from(b'$') && self.peek() == u32::from(b'{') {
                self.advance();
                return if head {
                    Token::TemplateHead
                } else {
                    Token::TemplateMiddle
                };
            } else if n == u32::from(b'\\') {
                // Templates tolerate invalid escapes lexically; validation
                // is deferred to the consumer.
                let _ = self.escape(false);
            }
        }
        self.set_error(ScanError::UnterminatedTemplate);
        Token::Error
    }

    // ── Regular expressions ─────────────────────────────────────────────────

    fn regexp(&mut self) -> Token {
        let mut in_class = false;
        let mut backslash = false;
        loop {
            if !self.can_shift() {
                self.set_error(ScanError::UnterminatedRegexp);
                return Token::Error;
            }
            let n = self.shift();
            if is_newline_char(n) {
                self.set_error(ScanError::UnterminatedRegexp);
                return Token::Error;
            }
            if backslash {
                backslash = false;
                continue;
            }
            if n == u32::from(b'\\') {
                backslash = true;
            } else if n == u32::from(b'[') {
                in_class = true;
            } else if n == u32::from(b']') {
                in_class = false;
            } else if n == u32::from(b'/') && !in_class {
                break;
            }
        }
        // Flags: a run of identifier-part code points, not validated here.
        while is_identifier_part(self.peek()) {
            self.advance();
        }
        Token::Regexp
    }

    // ── Escapes ─────────────────────────────────────────────────────────────

    /// Consume one escape sequence after the `\`.  Legal octal digit runs
    /// record a strict-mode error when `allow_legacy_octal` holds; otherwise
    /// the digits stand for themselves (`\0` is NUL, `\7` is `7`).
    fn escape(&mut self, allow_legacy_octal: bool) -> Result<(), ScanError> {
        if !self.can_shift() {
            return Err(ScanError::UnterminatedString);
        }
        let cp = self.shift();
        match cp {
            0x74 | 0x62 | 0x76 | 0x66 | 0x72 | 0x6E => Ok(()), // t b v f r n

            // Line continuation; \r\n is one terminator.
            0x0D => {
                if self.peek() == u32::from(b'\n') {
                    self.advance();
                }
                Ok(())
            }
            0x0A | 0x2028 | 0x2029 => Ok(()),

            0x30 => {
                // `\0` yields NUL unless octal digits follow.
                if self.peek_range(u32::from(b'0'), u32::from(b'7')) && allow_legacy_octal {
                    self.escape_octal(2);
                    self.result.strict_error = Some(StrictError::LegacyOctalEscape);
                }
                Ok(())
            }
            0x31..=0x33 => {
                if allow_legacy_octal {
                    self.escape_octal(2);
                    self.result.strict_error = Some(StrictError::LegacyOctalEscape);
                }
                Ok(())
            }
            0x34..=0x37 => {
                if allow_legacy_octal {
                    self.escape_octal(1);
                    self.result.strict_error = Some(StrictError::LegacyOctalEscape);
                }
                Ok(())
            }

            0x78 => {
                // \xNN — exactly two hex digits.
                if self.escape_hex(2, 2).is_some() {
                    Ok(())
                } else {
                    Err(ScanError::InvalidHexEscape)
                }
            }
            0x75 => {
                // \uNNNN or \u{1..6}.
                if self.unicode_escape().is_some() {
                    Ok(())
                } else {
                    Err(ScanError::InvalidUnicodeEscape)
                }
            }

            // Any other code point escapes to itself.
            _ => Ok(()),
        }
    }

    /// Consume up to `max` additional octal digits after the first.
    fn escape_octal(&mut self, max: u32) {
        let mut count = 0;
        while count < max && self.peek_range(u32::from(b'0'), u32::from(b'7')) {
            self.advance();
            count += 1;
        }
    }

    /// After `\u`: four hex digits, or `{` + one-to-six hex digits + `}`
    /// with a value of at most U+10FFFF.  Returns the decoded code point.
    fn unicode_escape(&mut self) -> Option<u32> {
        if self.peek() == u32::from(b'{') {
            self.advance();
            let v = self.escape_hex(1, 6)?;
            if self.peek() == u32::from(b'}') {
                self.advance();
                return Some(v);
            }
            None
        } else {
            self.escape_hex(4, 4)
        }
    }

    /// Consume between `min` and `max` hex digits; `None` when fewer than
    /// `min` are present or the value exceeds U+10FFFF.
    fn escape_hex(&mut self, min: u32, max: u32) -> Option<u32> {
        let mut val: u32 = 0;
        let mut count = 0;
        while count < max {
            let Some(d) = hex_char_value(self.peek()) else {
                break;
            };
            self.advance();
            val = val * 16 + d;
            count += 1;
        }
        if count >= min && val <= 0x10FFFF { Some(val) } else { None }
    }

    // ── Numbers ─────────────────────────────────────────────────────────────

    /// Decimal literal; `first` is the consumed leading digit, or `.` for
    /// the fraction form (the caller has verified a digit follows).
    fn number(&mut self, first: u32) -> Token {
        let mut integral = first != u32::from(b'.');
        if integral {
            self.decimal_digits();
            if self.peek() == u32::from(b'.') {
                integral = false;
                self.advance();
                self.decimal_digits();
            }
        } else {
            self.decimal_digits();
        }

        if self.peek() == u32::from(b'e') || self.peek() == u32::from(b'E') {
            integral = false;
            self.advance();
            if self.peek() == u32::from(b'+') || self.peek() == u32::from(b'-') {
                self.advance();
            }
            if !is_ascii_digit(self.peek()) {
                self.set_error(ScanError::MissingExponent);
            }
            self.decimal_digits();
        }

        if integral {
            self.bigint_suffix();
        }
        self.number_suffix();
        Token::Number
    }

    fn decimal_digits(&mut self) {
        while is_ascii_digit(self.peek()) {
            self.advance();
        }
    }

    fn hex_number(&mut self) -> Token {
        self.advance(); // x
        if hex_char_value(self.peek()).is_none() {
            self.set_error(ScanError::InvalidHexLiteral);
            return Token::Number;
        }
        while hex_char_value(self.peek()).is_some() {
            self.advance();
        }
        self.bigint_suffix();
        self.number_suffix();
        Token::Number
    }

    fn binary_number(&mut self) -> Token {
        self.advance(); // b
        if !self.peek_range(u32::from(b'0'), u32::from(b'1')) {
            self.set_error(ScanError::InvalidBinaryLiteral);
            return Token::Number;
        }
        while self.peek_range(u32::from(b'0'), u32::from(b'1')) {
            self.advance();
        }
        self.bigint_suffix();
        self.number_suffix();
        Token::Number
    }

    fn octal_number(&mut self) -> Token {
        self.advance(); // o
        if !self.peek_range(u32::from(b'0'), u32::from(b'7')) {
            self.set_error(ScanError::InvalidOctalLiteral);
            return Token::Number;
        }
        while self.peek_range(u32::from(b'0'), u32::from(b'7')) {
            self.advance();
        }
        self.bigint_suffix();
        self.number_suffix();
        Token::Number
    }

    /// Unprefixed `0`-led octal run; valid in sloppy mode only.  The first
    /// octal digit after the `0` is still unconsumed.
    fn legacy_octal_number(&mut self) -> Token {
        self.result.strict_error = Some(StrictError::LegacyOctalNumber);
        while self.peek_range(u32::from(b'0'), u32::from(b'7')) {
            self.advance();
        }
        self.number_suffix();
        Token::Number
    }

    /// Optional BigInt `n`; consumed and flagged, never an error by itself.
    fn bigint_suffix(&mut self) {
        if self.peek() == u32::from(b'n') {
            self.advance();
            self.result.flags.insert(TokenFlags::BIGINT_SUFFIX);
        }
    }

    /// A numeric literal must not run directly into an identifier
    /// (`3in`, `0x1z`).
    fn number_suffix(&mut self) {
        let n = self.peek();
        if n < 128 {
            if TOKEN_START_TABLE[n as usize] == TokenStartType::Identifier {
                self.set_error(ScanError::InvalidNumberSuffix);
            }
        } else if is_identifier_start(n) {
            self.set_error(ScanError::InvalidNumberSuffix);
        }
    }
}

fn is_ascii_digit(cp: u32) -> bool {
    (u32::from(b'0')..=u32::from(b'9')).contains(&cp)
}

fn hex_char_value(cp: u32) -> Option<u32> {
    match cp {
        0x30..=0x39 => Some(cp - 0x30),
        0x41..=0x46 => Some(cp - 0x41 + 10),
        0x61..=0x66 => Some(cp - 0x61 + 10),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
