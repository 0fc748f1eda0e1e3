//! `rlx` — rotor token-dump shell.
//!
//! Reads a JavaScript source file, decodes it to code points, drives the
//! scanner to end of input, and prints one line per token.  `rlx` plays the
//! parser's role as the authority on lexical context: it tracks the last
//! significant token to decide whether `/` divides, and a brace-depth stack
//! to decide whether `}` resumes a template.

use std::process::ExitCode;

use rotor_core::scanner::unicode::{is_newline_char, is_whitespace};
use rotor_core::scanner::{Context, Cursor, ScanResult, Scanner, Token};

/// Returns `true` when a `/` after `last` is a division operator rather than
/// the start of a regular-expression literal.
///
/// The heuristic: `/` divides only after tokens that produce a value.
fn slash_is_div(last: Option<Token>) -> bool {
    matches!(
        last,
        Some(
            Token::Identifier
                | Token::Number
                | Token::String
                | Token::Regexp
                | Token::TemplateBasic
                | Token::TemplateTail
                | Token::RightParen
                | Token::RightBracket
                | Token::Increment
                | Token::Decrement
                | Token::KwThis
                | Token::KwSuper
                | Token::KwTrue
                | Token::KwFalse
                | Token::KwNull
        )
    )
}

/// Drives the scanner with parser-grade context decisions and exposes every
/// result through end of input.
struct TokenDump<'src> {
    input: &'src [u32],
    scanner: Scanner<Cursor<'src>>,
    /// Most recent non-comment token, for `/` disambiguation.
    last: Option<Token>,
    /// `brace_depth` recorded at each open template substitution.  A `}`
    /// closes the substitution only when the depths match.
    template_stack: Vec<usize>,
    brace_depth: usize,
}

impl<'src> TokenDump<'src> {
    fn new(input: &'src [u32]) -> Self {
        Self {
            input,
            scanner: Scanner::new(input),
            last: None,
            template_stack: Vec::new(),
            brace_depth: 0,
        }
    }

    /// `true` when the next significant code point is a `}` that closes the
    /// innermost template substitution.
    ///
    /// The context argument must be decided before the scanner consumes the
    /// `}`, so we peek the raw input past inter-token whitespace.
    fn closes_substitution(&self) -> bool {
        if self.template_stack.last() != Some(&self.brace_depth) {
            return false;
        }
        let rest = &self.input[self.scanner.result().end as usize..];
        let next = rest
            .iter()
            .copied()
            .find(|&cp| !is_whitespace(cp) && !is_newline_char(cp));
        next == Some(u32::from(b'}'))
    }

    fn context(&self) -> Context {
        if self.closes_substitution() {
            Context::TemplateString
        } else if slash_is_div(self.last) {
            Context::Div
        } else {
            Context::Expression
        }
    }

    fn next(&mut self) -> ScanResult {
        let token = self.scanner.next(self.context());
        match token {
            Token::LeftBrace => self.brace_depth += 1,
            Token::RightBrace => self.brace_depth = self.brace_depth.saturating_sub(1),
            Token::TemplateHead => self.template_stack.push(self.brace_depth),
            Token::TemplateTail => {
                self.template_stack.pop();
            }
            _ => {}
        }
        if token != Token::Comment {
            self.last = Some(token);
        }
        *self.scanner.result()
    }
}

fn print_result(input: &[u32], r: &ScanResult) {
    let text: String = input[r.start as usize..r.end as usize]
        .iter()
        .filter_map(|&cp| char::from_u32(cp))
        .collect();
    let mut notes = String::new();
    if r.newline_before() {
        notes.push_str(" [nl]");
    }
    if r.bigint_suffix() {
        notes.push_str(" [bigint]");
    }
    if let Some(se) = r.strict_error {
        notes.push_str(&format!(" (strict: {se})"));
    }
    match r.error {
        Some(e) => println!("{:>5}..{:<5} error{notes} {e}: {text:?}", r.start, r.end),
        None => println!(
            "{:>5}..{:<5} {:<14}{notes} {text:?}",
            r.start,
            r.end,
            r.token.spelling()
        ),
    }
}


fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: rlx <file.js>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("rlx: {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input: Vec<u32> = source.chars().map(|c| c as u32).collect();
    let mut dump = TokenDump::new(&input);
    loop {
        let r = dump.next();
        print_result(&input, &r);
        match r.token {
            Token::End => return ExitCode::SUCCESS,
            Token::Error => return ExitCode::FAILURE,
            _ => {}
        }
    }
}
