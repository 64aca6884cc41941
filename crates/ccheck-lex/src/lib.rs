//! ccheck-lex - Lossless lexical analyzer for C99.
//!
//! Unlike a compiler lexer, this lexer never discards anything: every byte
//! of the input ends up in exactly one token, including whitespace runs,
//! comments, and preprocessor lines. Concatenating the text of all emitted
//! tokens reproduces the input verbatim, which is what allows the fixer to
//! rewrite a file by editing the token sequence and printing it back out.
//!
//! Malformed input (an unterminated string, a stray byte) becomes an
//! `Invalid` token; lexing always continues to the end of the input and
//! finishes with exactly one `Eof` token.

pub mod cursor;
mod edge_cases;
pub mod lexer;
pub mod stream;
pub mod token;

pub use lexer::Lexer;
pub use stream::{TokId, TokenStream};
pub use token::{keyword_from_ident, Token, TokenKind};

/// Tokenizes a translation unit into a fresh token stream.
///
/// The stream ends with exactly one `Eof` token.
pub fn tokenize(source: &str) -> TokenStream {
    let mut lexer = Lexer::new(source);
    let mut stream = TokenStream::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.kind == TokenKind::Eof;
        stream.push_back(tok);
        if is_eof {
            break;
        }
    }
    stream
}
