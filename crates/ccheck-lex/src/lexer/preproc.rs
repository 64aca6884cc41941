//! Preprocessor line lexing.
//!
//! A `#` that is the first non-whitespace byte on a physical line starts a
//! preprocessor line. The whole line, up to but not including the
//! terminating line break, becomes one `Preproc` token. A backslash
//! immediately before the line break continues the directive onto the next
//! physical line, and the continuation stays inside the same token.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a preprocessor line starting at `#`.
    pub(crate) fn lex_preproc(&mut self) -> TokenKind {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return TokenKind::Preproc;
            }

            match self.cursor.current_byte() {
                b'\n' => return TokenKind::Preproc,
                b'\r' if self.cursor.byte_at(1) == b'\n' => return TokenKind::Preproc,
                b'\\' => {
                    // Line continuation: swallow the backslash and the
                    // break, keep going on the next line.
                    if self.cursor.byte_at(1) == b'\n' {
                        self.cursor.advance();
                        self.cursor.advance();
                    } else if self.cursor.byte_at(1) == b'\r' && self.cursor.byte_at(2) == b'\n' {
                        self.cursor.advance();
                        self.cursor.advance();
                        self.cursor.advance();
                    } else {
                        self.cursor.advance();
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
    fn test_include_line() {
        let (kind, text) = lex_one("#include <stdio.h>\nint x;");
        assert_eq!(kind, TokenKind::Preproc);
        assert_eq!(text, "#include <stdio.h>");
    }

    #[test]
    fn test_newline_not_part_of_token() {
        let mut lexer = Lexer::new("#define X 1\n");
        assert_eq!(lexer.next_token().kind, TokenKind::Preproc);
        assert_eq!(lexer.next_token().kind, TokenKind::Newline);
    }

    #[test]
    fn test_continuation() {
        let (kind, text) = lex_one("#define MAX(a, b) \\\n\t((a) > (b) ? (a) : (b))\nint x;");
        assert_eq!(kind, TokenKind::Preproc);
        assert_eq!(text, "#define MAX(a, b) \\\n\t((a) > (b) ? (a) : (b))");
    }

    #[test]
    fn test_continuation_crlf() {
        let (kind, text) = lex_one("#define A \\\r\n B\r\n");
        assert_eq!(kind, TokenKind::Preproc);
        assert_eq!(text, "#define A \\\r\n B");
    }

    #[test]
    fn test_backslash_not_at_eol() {
        let (kind, text) = lex_one("#define SEP '\\\\'\n");
        assert_eq!(kind, TokenKind::Preproc);
        assert_eq!(text, "#define SEP '\\\\'");
    }

    #[test]
    fn test_directive_at_eof() {
        let (kind, text) = lex_one("#endif");
        assert_eq!(kind, TokenKind::Preproc);
        assert_eq!(text, "#endif");
    }
}
