//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct and the token dispatch
//! loop. The individual lexeme families live in the sibling modules as
//! `impl Lexer` blocks.

use ccheck_util::Pos;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lossless lexer for C99 source text.
///
/// Emits every byte of the input as part of some token. Whitespace runs are
/// minimal: a run of spaces is one `Space` token, a run of tabs one `Tab`
/// token, and each line break one `Newline` token; distinct kinds never
/// merge.
pub struct Lexer<'a> {
    /// Byte cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Byte offset where the current token started.
    pub(crate) token_start: usize,

    /// Position of the current token's first byte.
    token_bpos: Pos,

    /// True while only whitespace has been seen on the current physical
    /// line. A `#` in this state starts a preprocessor line.
    first_on_line: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_bpos: Pos::new(1, 1),
            first_on_line: true,
        }
    }

    /// Returns the next token.
    ///
    /// At the end of input this returns an `Eof` token with empty text;
    /// calling again keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.token_start = self.cursor.position();
        self.token_bpos = self.cursor.pos();

        if self.cursor.is_at_end() {
            let pos = self.cursor.pos();
            return Token::new(TokenKind::Eof, "", pos, pos);
        }

        let kind = match self.cursor.current_byte() {
            b' ' => {
                while self.cursor.current_byte() == b' ' {
                    self.cursor.advance();
                }
                TokenKind::Space
            }
            b'\t' => {
                while self.cursor.current_byte() == b'\t' {
                    self.cursor.advance();
                }
                TokenKind::Tab
            }
            b'\n' => {
                self.cursor.advance();
                TokenKind::Newline
            }
            b'\r' => {
                self.cursor.advance();
                if self.cursor.match_byte(b'\n') {
                    TokenKind::Newline
                } else {
                    TokenKind::Invalid
                }
            }
            b'#' if self.first_on_line => self.lex_preproc(),
            b'/' if self.cursor.byte_at(1) == b'/' => self.lex_line_comment(),
            b'/' if self.cursor.byte_at(1) == b'*' => self.lex_block_comment(),
            b'"' => self.lex_string(),
            b'\'' => self.lex_char(),
            b'0'..=b'9' => self.lex_number(),
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.lex_ident(),
            _ => self.lex_punct(),
        };

        self.first_on_line = match kind {
            TokenKind::Newline => true,
            TokenKind::Space | TokenKind::Tab => self.first_on_line,
            _ => false,
        };

        self.token(kind)
    }

    /// Builds the token for the bytes consumed since `next_token` started.
    pub(crate) fn token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.cursor.slice_from(self.token_start),
            self.token_bpos,
            self.cursor.last_pos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut toks = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            toks.push(tok);
            if done {
                break;
            }
        }
        toks
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let toks = lex_all("");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
        assert_eq!(toks[0].text, "");
    }

    #[test]
    fn test_whitespace_runs_are_single_tokens() {
        let toks = lex_all("   \t\t \n");
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Space,
                TokenKind::Tab,
                TokenKind::Space,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(toks[0].text, "   ");
        assert_eq!(toks[1].text, "\t\t");
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let toks = lex_all("x\r\ny");
        assert_eq!(toks[1].kind, TokenKind::Newline);
        assert_eq!(toks[1].text, "\r\n");
    }

    #[test]
    fn test_lone_cr_is_invalid() {
        let toks = lex_all("\rx");
        assert_eq!(toks[0].kind, TokenKind::Invalid);
        assert_eq!(toks[0].text, "\r");
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            kinds("int x = 1;"),
            vec![
                TokenKind::Int,
                TokenKind::Space,
                TokenKind::Ident,
                TokenKind::Space,
                TokenKind::Eq,
                TokenKind::Space,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let toks = lex_all("int x;\n");
        let int_tok = &toks[0];
        assert_eq!(int_tok.bpos, Pos::new(1, 1));
        assert_eq!(int_tok.epos, Pos::new(1, 3));
        let semi = toks.iter().find(|t| t.kind == TokenKind::Semicolon).unwrap();
        assert_eq!(semi.bpos, Pos::new(1, 6));
    }

    #[test]
    fn test_hash_mid_line_is_punctuator() {
        // '#' only begins a preprocessor line when nothing but whitespace
        // precedes it on the line.
        let toks = lex_all("a # b");
        assert_eq!(toks[2].kind, TokenKind::Hash);
    }

    #[test]
    fn test_hash_after_indent_is_preproc() {
        let toks = lex_all("\t#define X 1\n");
        assert_eq!(toks[1].kind, TokenKind::Preproc);
    }

    #[test]
    fn test_stray_byte_is_invalid() {
        let toks = lex_all("@");
        assert_eq!(toks[0].kind, TokenKind::Invalid);
        assert_eq!(toks[0].text, "@");
    }

    #[test]
    fn test_non_ascii_is_invalid_whole_char() {
        let toks = lex_all("é");
        assert_eq!(toks[0].kind, TokenKind::Invalid);
        assert_eq!(toks[0].text, "é");
    }
}
