//! The ordered token sequence of a translation unit.
//!
//! Tokens live in a `Vec` arena and are threaded onto an intrusive doubly
//! linked list of indices. The list order is the source order; the fixer
//! splices whitespace tokens in and out of the list without ever moving a
//! grammatical token. AST nodes refer to tokens through [`TokId`] handles,
//! which stay valid across splices because removed slots are retired rather
//! than reused.
//!
//! Each entry also carries the two fields the checker computes per token:
//! the expected indentation level (`indlvl`) and the line-begin flag
//! (`lbegin`).

use std::fmt::Write as _;

use crate::token::{Token, TokenKind};

/// Handle to a token in a [`TokenStream`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokId(u32);

impl TokId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One arena slot: the token plus its sequence links and checker state.
#[derive(Debug)]
struct StreamEntry {
    tok: Token,
    prev: Option<TokId>,
    next: Option<TokId>,
    /// False once the entry has been unlinked by the fixer.
    linked: bool,
    /// Expected indentation level in tabs, assigned by the AST walk.
    indlvl: u32,
    /// True if this token must be the first non-whitespace token on its line.
    lbegin: bool,
}

/// The mutable, ordered token sequence.
///
/// # Example
///
/// ```
/// use ccheck_lex::stream::TokenStream;
/// use ccheck_lex::token::{Token, TokenKind};
/// use ccheck_util::Pos;
///
/// let mut stream = TokenStream::new();
/// stream.push_back(Token::new(TokenKind::Int, "int", Pos::new(1, 1), Pos::new(1, 3)));
/// stream.push_back(Token::new(TokenKind::Newline, "\n", Pos::new(1, 4), Pos::new(1, 4)));
/// assert_eq!(stream.write(), "int\n");
/// ```
#[derive(Debug, Default)]
pub struct TokenStream {
    arena: Vec<StreamEntry>,
    head: Option<TokId>,
    tail: Option<TokId>,
}

impl TokenStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, tok: Token) -> TokId {
        let id = TokId(self.arena.len() as u32);
        self.arena.push(StreamEntry {
            tok,
            prev: None,
            next: None,
            linked: true,
            indlvl: 0,
            lbegin: false,
        });
        id
    }

    /// Appends a token at the end of the sequence.
    pub fn push_back(&mut self, tok: Token) -> TokId {
        let id = self.alloc(tok);
        match self.tail {
            Some(tail) => {
                self.arena[tail.index()].next = Some(id);
                self.arena[id.index()].prev = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Splices a new token in directly before `anchor`.
    pub fn insert_before(&mut self, anchor: TokId, tok: Token) -> TokId {
        debug_assert!(self.arena[anchor.index()].linked);
        let id = self.alloc(tok);
        let prev = self.arena[anchor.index()].prev;
        self.arena[id.index()].prev = prev;
        self.arena[id.index()].next = Some(anchor);
        self.arena[anchor.index()].prev = Some(id);
        match prev {
            Some(p) => self.arena[p.index()].next = Some(id),
            None => self.head = Some(id),
        }
        id
    }

    /// Splices a new token in directly after `anchor`.
    pub fn insert_after(&mut self, anchor: TokId, tok: Token) -> TokId {
        debug_assert!(self.arena[anchor.index()].linked);
        let id = self.alloc(tok);
        let next = self.arena[anchor.index()].next;
        self.arena[id.index()].next = next;
        self.arena[id.index()].prev = Some(anchor);
        self.arena[anchor.index()].next = Some(id);
        match next {
            Some(n) => self.arena[n.index()].prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    /// Unlinks a token from the sequence. The slot is retired; the handle
    /// must not be used afterwards.
    pub fn remove(&mut self, id: TokId) {
        let entry = &self.arena[id.index()];
        debug_assert!(entry.linked);
        let prev = entry.prev;
        let next = entry.next;
        match prev {
            Some(p) => self.arena[p.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.arena[n.index()].prev = prev,
            None => self.tail = prev,
        }
        let entry = &mut self.arena[id.index()];
        entry.prev = None;
        entry.next = None;
        entry.linked = false;
    }

    /// Returns the first token of the sequence.
    #[inline]
    pub fn first(&self) -> Option<TokId> {
        self.head
    }

    /// Returns the last token of the sequence.
    #[inline]
    pub fn last(&self) -> Option<TokId> {
        self.tail
    }

    /// Returns the token before `id` in sequence order.
    #[inline]
    pub fn prev(&self, id: TokId) -> Option<TokId> {
        self.arena[id.index()].prev
    }

    /// Returns the token after `id` in sequence order.
    #[inline]
    pub fn next(&self, id: TokId) -> Option<TokId> {
        self.arena[id.index()].next
    }

    /// Returns the token behind a handle.
    #[inline]
    pub fn tok(&self, id: TokId) -> &Token {
        &self.arena[id.index()].tok
    }

    /// Returns the kind of the token behind a handle.
    #[inline]
    pub fn kind(&self, id: TokId) -> TokenKind {
        self.arena[id.index()].tok.kind
    }

    /// Returns the indentation level assigned to a token.
    #[inline]
    pub fn indlvl(&self, id: TokId) -> u32 {
        self.arena[id.index()].indlvl
    }

    /// Assigns the indentation level of a token.
    #[inline]
    pub fn set_indlvl(&mut self, id: TokId, indlvl: u32) {
        self.arena[id.index()].indlvl = indlvl;
    }

    /// Returns the line-begin flag of a token.
    #[inline]
    pub fn lbegin(&self, id: TokId) -> bool {
        self.arena[id.index()].lbegin
    }

    /// Sets the line-begin flag of a token.
    #[inline]
    pub fn set_lbegin(&mut self, id: TokId, lbegin: bool) {
        self.arena[id.index()].lbegin = lbegin;
    }

    /// Iterates over the linked tokens in sequence order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            cur: self.head,
        }
    }

    /// Returns the number of linked tokens.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the sequence holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Concatenates every linked token's text in sequence order. This is the
    /// print-source facility: for a freshly lexed stream the result equals
    /// the input byte for byte.
    pub fn write(&self) -> String {
        let mut out = String::new();
        for id in self.iter() {
            let _ = write!(out, "{}", self.tok(id).text);
        }
        out
    }
}

/// Iterator over linked token handles.
pub struct Iter<'a> {
    stream: &'a TokenStream,
    cur: Option<TokId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = TokId;

    fn next(&mut self) -> Option<TokId> {
        let id = self.cur?;
        self.cur = self.stream.next(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccheck_util::Pos;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Pos::new(1, 1), Pos::new(1, 1))
    }

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.iter().map(|id| stream.kind(id)).collect()
    }

    #[test]
    fn test_push_back_order() {
        let mut stream = TokenStream::new();
        stream.push_back(tok(TokenKind::Int, "int"));
        stream.push_back(tok(TokenKind::Space, " "));
        stream.push_back(tok(TokenKind::Ident, "x"));
        assert_eq!(
            kinds(&stream),
            vec![TokenKind::Int, TokenKind::Space, TokenKind::Ident]
        );
        assert_eq!(stream.write(), "int x");
    }

    #[test]
    fn test_insert_before_head() {
        let mut stream = TokenStream::new();
        let x = stream.push_back(tok(TokenKind::Ident, "x"));
        stream.insert_before(x, tok(TokenKind::Tab, "\t"));
        assert_eq!(stream.write(), "\tx");
        assert_eq!(stream.first(), stream.prev(x));
    }

    #[test]
    fn test_insert_after_tail() {
        let mut stream = TokenStream::new();
        let x = stream.push_back(tok(TokenKind::Ident, "x"));
        let nl = stream.insert_after(x, tok(TokenKind::Newline, "\n"));
        assert_eq!(stream.write(), "x\n");
        assert_eq!(stream.last(), Some(nl));
    }

    #[test]
    fn test_insert_middle() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Ident, "a"));
        let b = stream.push_back(tok(TokenKind::Ident, "b"));
        stream.insert_after(a, tok(TokenKind::Space, " "));
        assert_eq!(stream.write(), "a b");
        assert_eq!(stream.prev(b).map(|id| stream.kind(id)), Some(TokenKind::Space));
    }

    #[test]
    fn test_remove_middle() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Ident, "a"));
        let sp = stream.push_back(tok(TokenKind::Space, " "));
        let b = stream.push_back(tok(TokenKind::Ident, "b"));
        stream.remove(sp);
        assert_eq!(stream.write(), "ab");
        assert_eq!(stream.next(a), Some(b));
        assert_eq!(stream.prev(b), Some(a));
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Space, " "));
        let b = stream.push_back(tok(TokenKind::Ident, "x"));
        let c = stream.push_back(tok(TokenKind::Newline, "\n"));
        stream.remove(a);
        assert_eq!(stream.first(), Some(b));
        stream.remove(c);
        assert_eq!(stream.last(), Some(b));
        assert_eq!(stream.write(), "x");
    }

    #[test]
    fn test_remove_only_token() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Ident, "x"));
        stream.remove(a);
        assert!(stream.is_empty());
        assert_eq!(stream.write(), "");
    }

    #[test]
    fn test_checker_state() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Return, "return"));
        assert_eq!(stream.indlvl(a), 0);
        assert!(!stream.lbegin(a));
        stream.set_indlvl(a, 2);
        stream.set_lbegin(a, true);
        assert_eq!(stream.indlvl(a), 2);
        assert!(stream.lbegin(a));
    }

    #[test]
    fn test_handles_stable_across_splices() {
        let mut stream = TokenStream::new();
        let a = stream.push_back(tok(TokenKind::Ident, "a"));
        let sp = stream.push_back(tok(TokenKind::Space, " "));
        let b = stream.push_back(tok(TokenKind::Ident, "b"));
        stream.remove(sp);
        stream.insert_before(b, tok(TokenKind::Tab, "\t"));
        // Handles to grammatical tokens still resolve.
        assert_eq!(stream.tok(a).text, "a");
        assert_eq!(stream.tok(b).text, "b");
        assert_eq!(stream.write(), "a\tb");
    }

    #[test]
    fn test_len() {
        let mut stream = TokenStream::new();
        assert_eq!(stream.len(), 0);
        let a = stream.push_back(tok(TokenKind::Ident, "a"));
        stream.push_back(tok(TokenKind::Semicolon, ";"));
        assert_eq!(stream.len(), 2);
        stream.remove(a);
        assert_eq!(stream.len(), 1);
    }
}
