//! Comment lexing.
//!
//! Both comment forms become single tokens carrying their full text; a
//! block comment may span many lines. `/**` opens a documentation comment,
//! which the checker treats differently from plain comments only in kind.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a `//` comment, up to but not including the line break.
    pub(crate) fn lex_line_comment(&mut self) -> TokenKind {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            match self.cursor.current_byte() {
                b'\n' => break,
                b'\r' if self.cursor.byte_at(1) == b'\n' => break,
                _ => self.cursor.advance(),
            }
        }

        TokenKind::Comment
    }

    /// Lexes a `/* ... */` or `/** ... */` comment as one token.
    ///
    /// C99 block comments do not nest. An unterminated comment yields an
    /// `Invalid` token covering the rest of the input.
    pub(crate) fn lex_block_comment(&mut self) -> TokenKind {
        self.cursor.advance();
        self.cursor.advance();

        // "/**" opens a documentation comment, except for the empty
        // comment "/**/".
        let kind = if self.cursor.current_byte() == b'*' && self.cursor.byte_at(1) != b'/' {
            TokenKind::DsComment
        } else {
            TokenKind::Comment
        };

        loop {
            if self.cursor.is_at_end() {
                return TokenKind::Invalid;
            }
            if self.cursor.current_byte() == b'*' && self.cursor.byte_at(1) == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return kind;
            }
            self.cursor.advance();
        }
    }
}
