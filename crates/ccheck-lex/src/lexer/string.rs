//! String and character literal lexing.
//!
//! The lexer keeps literal text exactly as written; escapes are recognized
//! only so far as needed to find the closing quote. A literal left open at
//! the end of its line becomes an `Invalid` token that stops before the
//! line break, so the break stays a token of its own.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal.
    pub(crate) fn lex_string(&mut self) -> TokenKind {
        self.lex_quoted(b'"', TokenKind::StrLit)
    }

    /// Lexes a character literal.
    pub(crate) fn lex_char(&mut self) -> TokenKind {
        self.lex_quoted(b'\'', TokenKind::CharLit)
    }

    fn lex_quoted(&mut self, quote: u8, kind: TokenKind) -> TokenKind {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return TokenKind::Invalid;
            }

            match self.cursor.current_byte() {
                b if b == quote => {
                    self.cursor.advance();
                    return kind;
                }
                b'\n' => return TokenKind::Invalid,
                b'\r' if self.cursor.byte_at(1) == b'\n' => return TokenKind::Invalid,
                b'\\' => {
                    self.cursor.advance();
                    match self.cursor.current_byte() {
                        b'\n' => return TokenKind::Invalid,
                        b'\r' if self.cursor.byte_at(1) == b'\n' => return TokenKind::Invalid,
                        0 if self.cursor.is_at_end() => return TokenKind::Invalid,
                        _ => self.cursor.advance(),
                    }
                }
                _ => self.cursor.advance(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_one(source: &str) -> (TokenKind, String) {
        let mut lexer = Lexer::new(source);
        let tok = lexer.next_token();
        (tok.kind, tok.text)
    }

    #[test]
    fn test_simple_string() {
        assert_eq!(lex_one("\"hello\""), (TokenKind::StrLit, "\"hello\"".into()));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(lex_one("\"\""), (TokenKind::StrLit, "\"\"".into()));
    }

    #[test]
    fn test_string_with_escapes() {
        let (kind, text) = lex_one(r#""a\n\t\\\"b" x"#);
        assert_eq!(kind, TokenKind::StrLit);
        assert_eq!(text, r#""a\n\t\\\"b""#);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let (kind, text) = lex_one(r#""\"""#);
        assert_eq!(kind, TokenKind::StrLit);
        assert_eq!(text, r#""\"""#);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let mut lexer = Lexer::new("\"open\nint");
        let bad = lexer.next_token();
        assert_eq!(bad.kind, TokenKind::Invalid);
        assert_eq!(bad.text, "\"open");
        assert_eq!(lexer.next_token().kind, TokenKind::Newline);
    }

    #[test]
    fn test_unterminated_string_at_eof() {
        assert_eq!(lex_one("\"open").0, TokenKind::Invalid);
    }

    #[test]
    fn test_char_literal() {
        assert_eq!(lex_one("'a'"), (TokenKind::CharLit, "'a'".into()));
        assert_eq!(lex_one(r"'\n'"), (TokenKind::CharLit, r"'\n'".into()));
        assert_eq!(lex_one(r"'\''").1, r"'\''");
    }

    #[test]
    fn test_unterminated_char() {
        assert_eq!(lex_one("'a").0, TokenKind::Invalid);
    }

    #[test]
    fn test_octal_and_hex_escapes_pass_through() {
        assert_eq!(lex_one(r"'\0'").1, r"'\0'");
        assert_eq!(lex_one(r#""\x41\102""#).1, r#""\x41\102""#);
    }
}
