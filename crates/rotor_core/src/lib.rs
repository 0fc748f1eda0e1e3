//! `rotor_core` — a streaming lexical scanner for ECMAScript source text.
//!
//! The scanner consumes a sequence of Unicode code points and produces
//! classified tokens with source-position spans, one per
//! [`Scanner::next`](scanner::Scanner::next) call.  The caller supplies the
//! lexical [`Context`](scanner::Context) per call, so `/` resolves to a
//! divide operator or a regular-expression literal, and `}` to a punctuator
//! or a template resumption, exactly where the grammar demands.
//!
//! # Crate layout
//!
//! - [`error`] — in-band lexical error types (`ScanError`, `StrictError`).
//! - [`scanner`] — the scanner state machine, token enumeration, cursor
//!   capability, start-dispatch table, token trie, and Unicode predicates.

/// In-band lexical error types.
pub mod error;
/// The scanner state machine and its supporting tables.
pub mod scanner;
