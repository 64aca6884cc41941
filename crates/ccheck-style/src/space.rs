//! Spacing predicates and repair primitives.
//!
//! Each predicate inspects the whitespace tokens around an addressed token
//! and either reports a diagnostic (check mode) or repairs the stream (fix
//! mode). Every predicate also assigns the token its expected indentation
//! level, which the line pass consumes afterwards. Repairs only ever
//! insert or remove whitespace tokens.

use ccheck_lex::{TokId, Token, TokenKind};
use ccheck_util::SrcRange;

use crate::{Scope, StyleChecker};

/// How to treat the first token of a subtree during the walk.
///
/// The statement walker decides what the leftmost token of an expression
/// or specifier sequence must satisfy and passes it down; every other
/// token gets its requirement from its own node.
#[derive(Clone, Copy)]
pub(crate) enum TokenCheck {
    /// No surrounding constraint; assign the indentation level only.
    Any,
    /// The token must be the first non-whitespace token on its line.
    LBegin(&'static str),
    /// Exactly one space before the token, which must not start a line.
    NbSpaceBefore(&'static str),
}

impl<'a> StyleChecker<'a> {
    /// Applies a [`TokenCheck`] to a token.
    pub(crate) fn apply(&mut self, tok: TokId, scope: Scope, tc: TokenCheck) {
        match tc {
            TokenCheck::Any => self.any(tok, scope),
            TokenCheck::LBegin(msg) => self.lbegin(tok, scope, msg),
            TokenCheck::NbSpaceBefore(msg) => self.nbspace_before(tok, scope, msg),
        }
    }

    /// Assigns the indentation level without any surrounding constraint.
    pub(crate) fn any(&mut self, tok: TokId, scope: Scope) {
        self.stream.set_indlvl(tok, scope.indlvl);
    }

    /// The token must be the first non-whitespace token on its line.
    ///
    /// Repair: remove the whitespace run between the previous
    /// non-whitespace token and this one, then reinstall a line break and
    /// the expected tab prefix.
    pub(crate) fn lbegin(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);
        self.stream.set_lbegin(tok, true);

        let mut run = Vec::new();
        let mut cur = self.stream.prev(tok);
        loop {
            match cur {
                None => return,
                Some(id) => match self.stream.kind(id) {
                    TokenKind::Space | TokenKind::Tab => {
                        run.push(id);
                        cur = self.stream.prev(id);
                    }
                    TokenKind::Newline => return,
                    _ => break,
                },
            }
        }

        if !self.fix {
            self.report_at_tok(tok, msg);
            return;
        }
        for id in run {
            self.stream.remove(id);
        }
        self.stream
            .insert_before(tok, Token::synthetic(TokenKind::Newline, "\n"));
        if scope.indlvl > 0 {
            let tabs = "\t".repeat(scope.indlvl as usize);
            self.stream
                .insert_before(tok, Token::synthetic(TokenKind::Tab, tabs));
        }
    }

    /// No whitespace may be adjacent before the token.
    pub(crate) fn nows_before(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        let run = self.ws_run_before(tok);
        if run.is_empty() {
            return;
        }
        if !self.fix {
            self.report_at_run(&run, msg);
            return;
        }
        for id in run {
            self.stream.remove(id);
        }
    }

    /// No whitespace may be adjacent after the token.
    pub(crate) fn nows_after(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        let run = self.ws_run_after(tok);
        if run.is_empty() {
            return;
        }
        if !self.fix {
            self.report_at_run(&run, msg);
            return;
        }
        for id in run {
            self.stream.remove(id);
        }
    }

    /// Either nothing or a single line break may follow the token; spaces
    /// and tabs before the break are a violation.
    pub(crate) fn nsbrk_after(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        let mut run = Vec::new();
        let mut cur = self.stream.next(tok);
        while let Some(id) = cur {
            match self.stream.kind(id) {
                TokenKind::Space | TokenKind::Tab => {
                    run.push(id);
                    cur = self.stream.next(id);
                }
                _ => break,
            }
        }
        if run.is_empty() {
            return;
        }
        if !self.fix {
            self.report_at_run(&run, msg);
            return;
        }
        for id in run {
            self.stream.remove(id);
        }
    }

    /// A single space or a line break is required before the token.
    ///
    /// Repair: insert one space when no whitespace is present at all.
    pub(crate) fn brkspace_before(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        if self
            .stream
            .prev(tok)
            .is_some_and(|id| self.stream.kind(id).is_whitespace())
        {
            return;
        }
        if !self.fix {
            self.report_at_tok(tok, msg);
            return;
        }
        self.stream
            .insert_before(tok, Token::synthetic(TokenKind::Space, " "));
    }

    /// A single space or a line break is required after the token.
    pub(crate) fn brkspace_after(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        if self
            .stream
            .next(tok)
            .is_some_and(|id| self.stream.kind(id).is_whitespace())
        {
            return;
        }
        if !self.fix {
            self.report_at_tok(tok, msg);
            return;
        }
        self.stream
            .insert_after(tok, Token::synthetic(TokenKind::Space, " "));
    }

    /// Exactly one space is required before the token, and the token must
    /// not be the first on its line.
    ///
    /// Repair: remove the adjacent whitespace run and insert one space.
    pub(crate) fn nbspace_before(&mut self, tok: TokId, scope: Scope, msg: &str) {
        self.stream.set_indlvl(tok, scope.indlvl);

        let prev = self.stream.prev(tok);
        let ok = match prev {
            Some(id) => {
                self.stream.kind(id) == TokenKind::Space
                    && self.stream.tok(id).text == " "
                    && self
                        .stream
                        .prev(id)
                        .is_some_and(|p| !self.stream.kind(p).is_whitespace())
            }
            None => false,
        };
        if ok {
            return;
        }
        if !self.fix {
            self.report_at_tok(tok, msg);
            return;
        }
        for id in self.ws_run_before(tok) {
            self.stream.remove(id);
        }
        self.stream
            .insert_before(tok, Token::synthetic(TokenKind::Space, " "));
    }

    /// Collects the whitespace tokens directly before `tok`, nearest last.
    fn ws_run_before(&self, tok: TokId) -> Vec<TokId> {
        let mut run = Vec::new();
        let mut cur = self.stream.prev(tok);
        while let Some(id) = cur {
            if !self.stream.kind(id).is_whitespace() {
                break;
            }
            run.push(id);
            cur = self.stream.prev(id);
        }
        run
    }

    /// Collects the whitespace tokens directly after `tok`, in order.
    fn ws_run_after(&self, tok: TokId) -> Vec<TokId> {
        let mut run = Vec::new();
        let mut cur = self.stream.next(tok);
        while let Some(id) = cur {
            if !self.stream.kind(id).is_whitespace() {
                break;
            }
            run.push(id);
            cur = self.stream.next(id);
        }
        run
    }

    /// Reports a violation anchored at a token.
    pub(crate) fn report_at_tok(&self, tok: TokId, msg: &str) {
        self.handler
            .warning(SrcRange::point(self.stream.tok(tok).bpos), msg);
    }

    /// Reports a violation covering a whitespace run.
    fn report_at_run(&self, run: &[TokId], msg: &str) {
        let range = run
            .iter()
            .map(|&id| self.stream.tok(id).range())
            .reduce(|a, b| a.merge(b))
            .unwrap_or_default();
        self.handler.warning(range, msg);
    }
}
