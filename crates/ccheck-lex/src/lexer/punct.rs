//! Punctuator lexing.
//!
//! Maximal-munch matching over the C99 punctuator set: at each point the
//! longest punctuator that matches is taken, so `<<=` never splits into
//! `<` `<=` and `a+++b` lexes as `a ++ + b`.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a punctuator, or an `Invalid` token for a byte that starts
    /// nothing.
    pub(crate) fn lex_punct(&mut self) -> TokenKind {
        use TokenKind::*;

        let b = self.cursor.current_byte();
        self.cursor.advance();

        match b {
            b'[' => LBracket,
            b']' => RBracket,
            b'(' => LParen,
            b')' => RParen,
            b'{' => LBrace,
            b'}' => RBrace,
            b';' => Semicolon,
            b',' => Comma,
            b'?' => Question,
            b':' => Colon,
            b'~' => Tilde,
            b'.' => {
                if self.cursor.current_byte() == b'.' && self.cursor.byte_at(1) == b'.' {
                    self.cursor.advance();
                    self.cursor.advance();
                    Ellipsis
                } else {
                    Period
                }
            }
            b'-' => {
                if self.cursor.match_byte(b'>') {
                    Arrow
                } else if self.cursor.match_byte(b'-') {
                    MinusMinus
                } else if self.cursor.match_byte(b'=') {
                    MinusEq
                } else {
                    Minus
                }
            }
            b'+' => {
                if self.cursor.match_byte(b'+') {
                    PlusPlus
                } else if self.cursor.match_byte(b'=') {
                    PlusEq
                } else {
                    Plus
                }
            }
            b'&' => {
                if self.cursor.match_byte(b'&') {
                    AndAnd
                } else if self.cursor.match_byte(b'=') {
                    AmpersandEq
                } else {
                    Ampersand
                }
            }
            b'*' => {
                if self.cursor.match_byte(b'=') {
                    StarEq
                } else {
                    Star
                }
            }
            b'/' => {
                // Comments were dispatched before we got here.
                if self.cursor.match_byte(b'=') {
                    SlashEq
                } else {
                    Slash
                }
            }
            b'%' => {
                if self.cursor.match_byte(b'=') {
                    PercentEq
                } else {
                    Percent
                }
            }
            b'<' => {
                if self.cursor.current_byte() == b'<' {
                    self.cursor.advance();
                    if self.cursor.match_byte(b'=') {
                        ShlEq
                    } else {
                        Shl
                    }
                } else if self.cursor.match_byte(b'=') {
                    LtEq
                } else {
                    Lt
                }
            }
            b'>' => {
                if self.cursor.current_byte() == b'>' {
                    self.cursor.advance();
                    if self.cursor.match_byte(b'=') {
                        ShrEq
                    } else {
                        Shr
                    }
                } else if self.cursor.match_byte(b'=') {
                    GtEq
                } else {
                    Gt
                }
            }
            b'=' => {
                if self.cursor.match_byte(b'=') {
                    EqEq
                } else {
                    Eq
                }
            }
            b'!' => {
                if self.cursor.match_byte(b'=') {
                    NotEq
                } else {
                    Bang
                }
            }
            b'^' => {
                if self.cursor.match_byte(b'=') {
                    CaretEq
                } else {
                    Caret
                }
            }
            b'|' => {
                if self.cursor.match_byte(b'|') {
                    OrOr
                } else if self.cursor.match_byte(b'=') {
                    PipeEq
                } else {
                    Pipe
                }
            }
            b'#' => {
                if self.cursor.match_byte(b'#') {
                    HashHash
                } else {
                    Hash
                }
            }
            _ => Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn test_single_byte_punctuators() {
        assert_eq!(
            kinds("[](){};,?:~"),
            vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Question,
                TokenKind::Colon,
                TokenKind::Tilde,
            ]
        );
    }

    #[test]
    fn test_maximal_munch_shifts() {
        assert_eq!(kinds("<<="), vec![TokenKind::ShlEq]);
        assert_eq!(kinds(">>="), vec![TokenKind::ShrEq]);
        assert_eq!(kinds("<<"), vec![TokenKind::Shl]);
        assert_eq!(kinds("<="), vec![TokenKind::LtEq]);
        assert_eq!(kinds("<"), vec![TokenKind::Lt]);
    }

    #[test]
    fn test_arrow_and_decrement() {
        assert_eq!(kinds("->"), vec![TokenKind::Arrow]);
        assert_eq!(kinds("--"), vec![TokenKind::MinusMinus]);
        assert_eq!(kinds("-="), vec![TokenKind::MinusEq]);
        assert_eq!(kinds("-"), vec![TokenKind::Minus]);
    }

    #[test]
    fn test_plus_plus_plus() {
        // Maximal munch: "+++" is "++" then "+".
        assert_eq!(kinds("+++"), vec![TokenKind::PlusPlus, TokenKind::Plus]);
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(kinds("..."), vec![TokenKind::Ellipsis]);
        assert_eq!(kinds(".."), vec![TokenKind::Period, TokenKind::Period]);
    }

    #[test]
    fn test_logical_and_bitwise() {
        assert_eq!(kinds("&&"), vec![TokenKind::AndAnd]);
        assert_eq!(kinds("&="), vec![TokenKind::AmpersandEq]);
        assert_eq!(kinds("||"), vec![TokenKind::OrOr]);
        assert_eq!(kinds("|="), vec![TokenKind::PipeEq]);
        assert_eq!(kinds("^="), vec![TokenKind::CaretEq]);
    }

    #[test]
    fn test_equality() {
        assert_eq!(kinds("=="), vec![TokenKind::EqEq]);
        assert_eq!(kinds("!="), vec![TokenKind::NotEq]);
        assert_eq!(kinds("="), vec![TokenKind::Eq]);
        assert_eq!(kinds("!"), vec![TokenKind::Bang]);
    }

    #[test]
    fn test_hash_tokens() {
        // Mid-line hashes; at line start they lex as preprocessor lines.
        assert_eq!(kinds("a ## b")[2], TokenKind::HashHash);
        assert_eq!(kinds("a # b")[2], TokenKind::Hash);
    }
}
