//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, TokenKind};
use crate::Lexer;

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers match `[_A-Za-z][_A-Za-z0-9]*`; the keyword table decides
    /// whether the result is a keyword kind or `Ident`.
    pub(crate) fn lex_ident(&mut self) -> TokenKind {
        while is_ident_continue(self.cursor.current_byte()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        keyword_from_ident(text).unwrap_or(TokenKind::Ident)
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
    fn test_simple_identifier() {
        assert_eq!(lex_one("foo"), (TokenKind::Ident, "foo".into()));
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        assert_eq!(lex_one("foo_bar_12 "), (TokenKind::Ident, "foo_bar_12".into()));
    }

    #[test]
    fn test_leading_underscore() {
        assert_eq!(lex_one("_x"), (TokenKind::Ident, "_x".into()));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(lex_one("if").0, TokenKind::If);
        assert_eq!(lex_one("else").0, TokenKind::Else);
        assert_eq!(lex_one("sizeof").0, TokenKind::Sizeof);
        assert_eq!(lex_one("struct").0, TokenKind::Struct);
        assert_eq!(lex_one("volatile").0, TokenKind::Volatile);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(lex_one("iffy"), (TokenKind::Ident, "iffy".into()));
        assert_eq!(lex_one("return_value").0, TokenKind::Ident);
    }

    #[test]
    fn test_identifier_stops_at_punctuation() {
        assert_eq!(lex_one("abc("), (TokenKind::Ident, "abc".into()));
    }
}
