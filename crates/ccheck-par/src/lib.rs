//! ccheck-par - Recursive-descent parser for the C99 subset.
//!
//! The parser reads grammatical tokens from the token stream, hiding
//! whitespace, comments, and preprocessor lines from the grammar rules,
//! and builds the AST defined in [`ast`]. Every token a production
//! consumes is recorded in the matching slot of the node it produces, so
//! the checker can later address the concrete tokens through the tree.
//!
//! A syntax error is fatal for the translation unit: the parser reports
//! the offending token's position together with the expected alternative
//! and gives up. There is no recovery or resynchronization. An `Invalid`
//! token from the lexer surfaces as such an error as soon as the grammar
//! reaches it.

pub mod ast;
mod decl;
mod edge_cases;
mod expr;
mod stmt;

use ccheck_lex::{TokId, TokenKind, TokenStream};
use ccheck_util::SrcRange;
use thiserror::Error;

use crate::ast::{ModItem, Module};

/// A fatal syntax error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{range}: expected {expected}, found {found}")]
pub struct ParseError {
    /// Range of the offending token.
    pub range: SrcRange,
    /// What the grammar would have accepted here.
    pub expected: String,
    /// What was found instead, quoted, or "end of file".
    pub found: String,
}

/// Parser result type.
pub type PResult<T> = Result<T, ParseError>;

/// Parses a translation unit from a token stream.
pub fn parse_module(stream: &TokenStream) -> PResult<Module> {
    Parser::new(stream).parse_module()
}

/// Recursive-descent parser over a token stream.
pub struct Parser<'a> {
    stream: &'a TokenStream,

    /// Current grammatical token; always points at a linked token, the
    /// final `Eof` at the latest.
    cur: Option<TokId>,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first grammatical token.
    pub fn new(stream: &'a TokenStream) -> Self {
        let cur = Self::skip_nongrammar(stream, stream.first());
        Self { stream, cur }
    }

    /// Parses a whole translation unit: `module := gdecln*`, with
    /// keyword-led statements also accepted at file scope.
    pub fn parse_module(&mut self) -> PResult<Module> {
        let mut items = Vec::new();
        while self.kind() != TokenKind::Eof {
            let item = if Self::starts_top_level_stmt(self.kind()) {
                ModItem::Stmt(self.parse_stmt()?)
            } else {
                ModItem::Decl(self.parse_gdecln()?)
            };
            items.push(item);
        }
        Ok(Module { items })
    }

    fn starts_top_level_stmt(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::If
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::For
                | TokenKind::Switch
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Goto
        )
    }

    fn skip_nongrammar(stream: &TokenStream, mut cur: Option<TokId>) -> Option<TokId> {
        while let Some(id) = cur {
            if !stream.kind(id).is_nongrammar() {
                break;
            }
            cur = stream.next(id);
        }
        cur
    }

    /// Returns the kind of the current token.
    pub(crate) fn kind(&self) -> TokenKind {
        match self.cur {
            Some(id) => self.stream.kind(id),
            None => TokenKind::Eof,
        }
    }

    /// Returns the kind of the n-th grammatical token after the current
    /// one (`peek_kind(0)` is the current token).
    pub(crate) fn peek_kind(&self, n: usize) -> TokenKind {
        let mut cur = self.cur;
        for _ in 0..n {
            cur = match cur {
                Some(id) => Self::skip_nongrammar(self.stream, self.stream.next(id)),
                None => None,
            };
        }
        match cur {
            Some(id) => self.stream.kind(id),
            None => TokenKind::Eof,
        }
    }

    /// Consumes the current token and returns its handle.
    pub(crate) fn bump(&mut self) -> TokId {
        let id = self.cur.expect("bump past end of stream");
        debug_assert!(self.stream.kind(id) != TokenKind::Eof, "bump at eof");
        self.cur = Self::skip_nongrammar(self.stream, self.stream.next(id));
        id
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<TokId> {
        if self.kind() == kind {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consumes a token of the given kind or fails with a syntax error.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<TokId> {
        if self.kind() == kind {
            Ok(self.bump())
        } else {
            self.error(expected)
        }
    }

    /// Builds a syntax error at the current token.
    pub(crate) fn error<T>(&self, expected: &str) -> PResult<T> {
        let (range, found) = match self.cur {
            Some(id) => {
                let tok = self.stream.tok(id);
                if tok.kind == TokenKind::Eof {
                    (tok.range(), "end of file".to_string())
                } else {
                    (tok.range(), format!("'{}'", tok.text))
                }
            }
            None => (SrcRange::default(), "end of file".to_string()),
        };
        Err(ParseError {
            range,
            expected: expected.to_string(),
            found,
        })
    }
}
