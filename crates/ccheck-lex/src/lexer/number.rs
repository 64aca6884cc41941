//! Integer constant lexing.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer constant.
    ///
    /// Handles decimal, octal (leading `0`), and hexadecimal (`0x`/`0X`)
    /// forms, followed by any mix of `u`/`U` and `l`/`L` suffixes. The
    /// lexer records the text only; it does not evaluate the value, so an
    /// out-of-range constant is not its concern.
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        if self.cursor.current_byte() == b'0'
            && matches!(self.cursor.byte_at(1), b'x' | b'X')
            && self.cursor.byte_at(2).is_ascii_hexdigit()
        {
            self.cursor.advance();
            self.cursor.advance();
            while self.cursor.current_byte().is_ascii_hexdigit() {
                self.cursor.advance();
            }
        } else {
            while self.cursor.current_byte().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        while matches!(self.cursor.current_byte(), b'u' | b'U' | b'l' | b'L') {
            self.cursor.advance();
        }

        TokenKind::Number
    }
}
