//! Punctuator and keyword matcher.
//!
//! The two cascades below are the single source of truth for token
//! spellings.  Both consume the minimum number of code points needed to
//! resolve the longest valid token from the first (already consumed) code
//! point: longer spellings always win (`===` beats `==`, `>>>=` beats
//! `>>>`).
//!
//! [`match_keyword`] only consumes code points that follow a live edge, so a
//! failed match leaves the remaining identifier text in place for the
//! caller.  Whether the identifier continues *past* a successful match
//! (`iffy` is not `if`) is the scanner's concern, not the trie's.

use super::cursor::CodePointSource;
use super::token::Token;

/// Stateless matcher driven by the scanner through [`CodePointSource`].
pub struct TokenTrie;

/// Consume the current code point when it equals `b`.
fn eat<S: CodePointSource>(src: &mut S, b: u8) -> bool {
    if src.peek() == u32::from(b) {
        src.advance();
        true
    } else {
        false
    }
}

/// Walk the unique remainder of a keyword spelling.  Consumes matching code
/// points one at a time and stops at the first mismatch.
fn tail<S: CodePointSource>(src: &mut S, rest: &[u8], token: Token) -> Token {
    for &b in rest {
        if !eat(src, b) {
            return Token::Error;
        }
    }
    token
}

impl TokenTrie {
    /// Resolve the longest punctuator starting at `first`, which the caller
    /// has already consumed.
    pub fn match_punctuator<S: CodePointSource>(src: &mut S, first: u32) -> Token {
        match first {
            0x7B => Token::LeftBrace,
            0x7D => Token::RightBrace,
            0x28 => Token::LeftParen,
            0x29 => Token::RightParen,
            0x5B => Token::LeftBracket,
            0x5D => Token::RightBracket,
            0x3B => Token::Semicolon,
            0x3A => Token::Colon,
            0x2C => Token::Comma,
            0x3F => Token::Question,

            // &  &=  &&
            0x26 => {
                if eat(src, b'&') {
                    Token::LogicalAnd
                } else if eat(src, b'=') {
                    Token::BitwiseAndAssign
                } else {
                    Token::BitwiseAnd
                }
            }

            // |  |=  ||
            0x7C => {
                if eat(src, b'|') {
                    Token::LogicalOr
                } else if eat(src, b'=') {
                    Token::BitwiseOrAssign
                } else {
                    Token::BitwiseOr
                }
            }

            // ^  ^=
            0x5E => {
                if eat(src, b'=') {
                    Token::BitwiseXorAssign
                } else {
                    Token::BitwiseXor
                }
            }

            // ~  ~=
            0x7E => {
                if eat(src, b'=') {
                    Token::BitwiseNotAssign
                } else {
                    Token::BitwiseNot
                }
            }

            // <  <=  <<  <<=  <<<  <<<=
            0x3C => {
                if eat(src, b'<') {
                    if eat(src, b'<') {
                        if eat(src, b'=') {
                            Token::LeftShiftZeroAssign
                        } else {
                            Token::LeftShiftZero
                        }
                    } else if eat(src, b'=') {
                        Token::LeftShiftAssign
                    } else {
                        Token::LeftShift
                    }
                } else if eat(src, b'=') {
                    Token::LessThanEqual
                } else {
                    Token::LessThan
                }
            }

            // >  >=  >>  >>=  >>>  >>>=
            0x3E => {
                if eat(src, b'>') {
                    if eat(src, b'>') {
                        if eat(src, b'=') {
                            Token::RightShiftZeroAssign
                        } else {
                            Token::RightShiftZero
                        }
                    } else if eat(src, b'=') {
                        Token::RightShiftAssign
                    } else {
                        Token::RightShift
                    }
                } else if eat(src, b'=') {
                    Token::GreaterThanEqual
                } else {
                    Token::GreaterThan
                }
            }

            // +  +=  ++
            0x2B => {
                if eat(src, b'+') {
                    Token::Increment
                } else if eat(src, b'=') {
                    Token::PlusAssign
                } else {
                    Token::Plus
                }
            }

            // -  -=  --
            0x2D => {
                if eat(src, b'-') {
                    Token::Decrement
                } else if eat(src, b'=') {
                    Token::MinusAssign
                } else {
                    Token::Minus
                }
            }

            // *  *=  **  **=
            0x2A => {
                if eat(src, b'*') {
                    if eat(src, b'=') {
                        Token::PowAssign
                    } else {
                        Token::Pow
                    }
                } else if eat(src, b'=') {
                    Token::MultiplyAssign
                } else {
                    Token::Multiply
                }
            }

            // /  /=  (comments and regexps are dispatched before the trie)
            0x2F => {
                if eat(src, b'=') {
                    Token::DivideAssign
                } else {
                    Token::Divide
                }
            }

            // %  %=
            0x25 => {
                if eat(src, b'=') {
                    Token::ModAssign
                } else {
                    Token::Mod
                }
            }

            // =  ==  ===  =>
            0x3D => {
                if eat(src, b'=') {
                    if eat(src, b'=') {
                        Token::StrictEqual
                    } else {
                        Token::Equal
                    }
                } else if eat(src, b'>') {
                    Token::FatArrow
                } else {
                    Token::Assign
                }
            }

            // !  !=  !==
            0x21 => {
                if eat(src, b'=') {
                    if eat(src, b'=') {
                        Token::StrictNotEqual
                    } else {
                        Token::NotEqual
                    }
                } else {
                    Token::LogicalNot
                }
            }

            // .  ...  (`.5` is dispatched to the number sublexer first; a
            // lone `..` is two dot tokens, hence the two-deep peek)
            0x2E => {
                if src.peek() == u32::from(b'.') && src.peek2() == u32::from(b'.') {
                    src.advance();
                    src.advance();
                    Token::Dot3
                } else {
                    Token::Dot
                }
            }

            _ => Token::Error,
        }
    }

    /// Walk the keyword trie from `first` (already consumed).  Returns the
    /// reserved-word kind on an exact spelling match, or [`Token::Error`]
    /// when no keyword starts with the consumed code points.
    pub fn match_keyword<S: CodePointSource>(src: &mut S, first: u32) -> Token {
        if first >= 128 {
            return Token::Error;
        }
        match first as u8 {
            b'a' => {
                if eat(src, b's') {
                    if eat(src, b'y') {
                        tail(src, b"nc", Token::KwAsync)
                    } else {
                        Token::KwAs
                    }
                } else if eat(src, b'w') {
                    tail(src, b"ait", Token::KwAwait)
                } else {
                    Token::Error
                }
            }
            b'b' => tail(src, b"reak", Token::KwBreak),
            b'c' => {
                if eat(src, b'a') {
                    if eat(src, b's') {
                        tail(src, b"e", Token::KwCase)
                    } else if eat(src, b't') {
                        tail(src, b"ch", Token::KwCatch)
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'l') {
                    tail(src, b"ass", Token::KwClass)
                } else if eat(src, b'o') {
                    if eat(src, b'n') {
                        if eat(src, b's') {
                            tail(src, b"t", Token::KwConst)
                        } else if eat(src, b't') {
                            tail(src, b"inue", Token::KwContinue)
                        } else {
                            Token::Error
                        }
                    } else {
                        Token::Error
                    }
                } else {
                    Token::Error
                }
            }
            b'd' => {
                if eat(src, b'e') {
                    if eat(src, b'b') {
                        tail(src, b"ugger", Token::KwDebugger)
                    } else if eat(src, b'f') {
                        tail(src, b"ault", Token::KwDefault)
                    } else if eat(src, b'l') {
                        tail(src, b"ete", Token::KwDelete)
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'o') {
                    Token::KwDo
                } else {
                    Token::Error
                }
            }
            b'e' => {
                if eat(src, b'l') {
                    tail(src, b"se", Token::KwElse)
                } else if eat(src, b'n') {
                    tail(src, b"um", Token::KwEnum)
                } else if eat(src, b'x') {
                    if eat(src, b'p') {
                        tail(src, b"ort", Token::KwExport)
                    } else if eat(src, b't') {
                        tail(src, b"ends", Token::KwExtends)
                    } else {
                        Token::Error
                    }
                } else {
                    Token::Error
                }
            }
            b'f' => {
                if eat(src, b'a') {
                    tail(src, b"lse", Token::KwFalse)
                } else if eat(src, b'i') {
                    tail(src, b"nally", Token::KwFinally)
                } else if eat(src, b'o') {
                    tail(src, b"r", Token::KwFor)
                } else if eat(src, b'r') {
                    tail(src, b"om", Token::KwFrom)
                } else if eat(src, b'u') {
                    tail(src, b"nction", Token::KwFunction)
                } else {
                    Token::Error
                }
            }
            b'i' => {
                if eat(src, b'f') {
                    Token::KwIf
                } else if eat(src, b'm') {
                    if eat(src, b'p') {
                        if eat(src, b'l') {
                            tail(src, b"ements", Token::KwImplements)
                        } else if eat(src, b'o') {
                            tail(src, b"rt", Token::KwImport)
                        } else {
                            Token::Error
                        }
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'n') {
                    if eat(src, b's') {
                        tail(src, b"tanceof", Token::KwInstanceof)
                    } else if eat(src, b't') {
                        tail(src, b"erface", Token::KwInterface)
                    } else {
                        Token::KwIn
                    }
                } else {
                    Token::Error
                }
            }
            b'l' => tail(src, b"et", Token::KwLet),
            b'n' => {
                if eat(src, b'e') {
                    tail(src, b"w", Token::KwNew)
                } else if eat(src, b'u') {
                    tail(src, b"ll", Token::KwNull)
                } else {
                    Token::Error
                }
            }
            b'o' => tail(src, b"f", Token::KwOf),
            b'p' => {
                if eat(src, b'a') {
                    tail(src, b"ckage", Token::KwPackage)
                } else if eat(src, b'r') {
                    if eat(src, b'i') {
                        tail(src, b"vate", Token::KwPrivate)
                    } else if eat(src, b'o') {
                        tail(src, b"tected", Token::KwProtected)
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'u') {
                    tail(src, b"blic", Token::KwPublic)
                } else {
                    Token::Error
                }
            }
            b'r' => tail(src, b"eturn", Token::KwReturn),
            b's' => {
                if eat(src, b't') {
                    tail(src, b"atic", Token::KwStatic)
                } else if eat(src, b'u') {
                    tail(src, b"per", Token::KwSuper)
                } else if eat(src, b'w') {
                    tail(src, b"itch", Token::KwSwitch)
                } else {
                    Token::Error
                }
            }
            b't' => {
                if eat(src, b'h') {
                    if eat(src, b'i') {
                        tail(src, b"s", Token::KwThis)
                    } else if eat(src, b'r') {
                        tail(src, b"ow", Token::KwThrow)
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'r') {
                    if eat(src, b'u') {
                        tail(src, b"e", Token::KwTrue)
                    } else if eat(src, b'y') {
                        Token::KwTry
                    } else {
                        Token::Error
                    }
                } else if eat(src, b'y') {
                    tail(src, b"peof", Token::KwTypeof)
                } else {
                    Token::Error
                }
            }
            b'v' => {
                if eat(src, b'a') {
                    tail(src, b"r", Token::KwVar)
                } else if eat(src, b'o') {
                    tail(src, b"id", Token::KwVoid)
                } else {
                    Token::Error
                }
            }
            b'w' => {
                if eat(src, b'h') {
                    tail(src, b"ile", Token::KwWhile)
                } else if eat(src, b'i') {
                    tail(src, b"th", Token::KwWith)
                } else {
                    Token::Error
                }
            }
            b'y' => tail(src, b"ield", Token::KwYield),
            _ => Token::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::cursor::Cursor;
    use crate::scanner::token::{KEYWORD_SPELLINGS, PUNCTUATOR_SPELLINGS};

    fn cps(src: &str) -> Vec<u32> {
        src.chars().map(|c| c as u32).collect()
    }

    fn punctuator(src: &str) -> (Token, u32) {
        let input = cps(src);
        let mut cur = Cursor::new(&input);
        let first = cur.shift();
        let t = TokenTrie::match_punctuator(&mut cur, first);
        (t, cur.position())
    }

    fn keyword(src: &str) -> (Token, u32) {
        let input = cps(src);
        let mut cur = Cursor::new(&input);
        let first = cur.shift();
        let t = TokenTrie::match_keyword(&mut cur, first);
        (t, cur.position())
    }

    #[test]
    fn test_every_punctuator_spelling_round_trips() {
        for &(text, token) in PUNCTUATOR_SPELLINGS {
            let (t, consumed) = punctuator(text);
            assert_eq!(t, token, "{text}");
            assert_eq!(consumed as usize, text.len(), "{text}");
        }
    }

    #[test]
    fn test_every_keyword_spelling_round_trips() {
        for &(text, token) in KEYWORD_SPELLINGS {
            let (t, consumed) = keyword(text);
            assert_eq!(t, token, "{text}");
            assert_eq!(consumed as usize, text.len(), "{text}");
        }
    }

    #[test]
    fn test_longest_match_wins_with_trailing_input() {
        assert_eq!(punctuator("<<<=1").0, Token::LeftShiftZeroAssign);
        assert_eq!(punctuator(">>>=x").0, Token::RightShiftZeroAssign);
        assert_eq!(punctuator("===y").0, Token::StrictEqual);
        assert_eq!(punctuator("**=z").0, Token::PowAssign);
        assert_eq!(punctuator("...rest").0, Token::Dot3);
    }

    #[test]
    fn test_shorter_spelling_when_long_form_breaks_off() {
        assert_eq!(punctuator("<<*").0, Token::LeftShift);
        assert_eq!(punctuator(">>;").0, Token::RightShift);
        assert_eq!(punctuator("==!").0, Token::Equal);
        assert_eq!(punctuator("+-").0, Token::Plus);
    }

    #[test]
    fn test_double_dot_is_single_dot() {
        // `..` is not a token: the trie must leave the second dot in place.
        let (t, consumed) = punctuator("..");
        assert_eq!(t, Token::Dot);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_keyword_prefix_stops_cleanly() {
        // `in` resolves even when the next code point breaks the longer
        // spellings; the unmatched code point is not consumed.
        let (t, consumed) = keyword("inx");
        assert_eq!(t, Token::KwIn);
        assert_eq!(consumed, 2);

        let (t, consumed) = keyword("as_");
        assert_eq!(t, Token::KwAs);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_keyword_mismatch_returns_error() {
        assert_eq!(keyword("xyz").0, Token::Error);
        assert_eq!(keyword("inst").0, Token::Error);
        assert_eq!(keyword("asyncc").0, Token::KwAsync); // scanner downgrades
        assert_eq!(keyword("q").0, Token::Error);
    }

    #[test]
    fn test_keyword_rejects_non_ascii_start() {
        let input = [0x3C0u32]; // π
        let mut cur = Cursor::new(&input);
        let first = cur.shift();
        assert_eq!(TokenTrie::match_keyword(&mut cur, first), Token::Error);
    }
}
