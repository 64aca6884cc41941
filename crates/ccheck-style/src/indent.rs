//! Physical-line checks: indentation prefix, trailing whitespace, and the
//! line length limit.
//!
//! Runs after the AST walk, which has already assigned each grammatical
//! token its expected indentation level and line-begin flag. The scan
//! walks the token sequence line by line; a "line" is the run of tokens
//! between newline tokens, so a multi-line comment counts as part of the
//! line it starts on.

use ccheck_lex::{TokId, Token, TokenKind};
use ccheck_util::SrcRange;

use crate::StyleChecker;

/// Column limit for a physical line.
const LINE_LIMIT: u32 = 80;

/// Continuation lines take this many spaces beyond the tab prefix.
const CONT_SPACES: usize = 4;

impl<'a> StyleChecker<'a> {
    /// Scans the token sequence line by line.
    pub(crate) fn check_lines(&mut self) {
        let mut line_start = self.stream.first();
        while let Some(start) = line_start {
            line_start = self.check_line(start);
        }
    }

    /// Processes the line starting at `start`. Returns the first token of
    /// the next line.
    fn check_line(&mut self, start: TokId) -> Option<TokId> {
        // Collect this line's tokens, up to but not including the newline.
        let mut line = Vec::new();
        let mut newline = None;
        let mut cur = Some(start);
        while let Some(id) = cur {
            match self.stream.kind(id) {
                TokenKind::Newline => {
                    newline = Some(id);
                    break;
                }
                TokenKind::Eof => break,
                _ => {
                    line.push(id);
                    cur = self.stream.next(id);
                }
            }
        }
        let next_line = newline.and_then(|nl| self.stream.next(nl));

        self.check_line_indent(&line);
        self.check_trailing_ws(&line);
        self.check_line_length(&line);

        next_line
    }

    /// Enforces the leading whitespace pattern: a run of tabs matching the
    /// first token's indentation level, then exactly four spaces on
    /// continuation lines and none otherwise.
    fn check_line_indent(&mut self, line: &[TokId]) {
        // Measure the prefix: tabs, then spaces, then anything mixed in.
        let mut tabs = 0usize;
        let mut spaces = 0usize;
        let mut extra = 0usize;
        let mut prefix = Vec::new();
        let mut tok = None;
        for &id in line {
            let entry = self.stream.tok(id);
            match entry.kind {
                TokenKind::Tab if spaces == 0 && extra == 0 => {
                    tabs += entry.text.len();
                    prefix.push(id);
                }
                TokenKind::Space if extra == 0 => {
                    spaces += entry.text.len();
                    prefix.push(id);
                }
                TokenKind::Tab | TokenKind::Space => {
                    extra += entry.text.len();
                    prefix.push(id);
                }
                _ => {
                    tok = Some(id);
                    break;
                }
            }
        }

        // Blank lines and comment-first lines are not enforced.
        let Some(tok) = tok else { return };
        let kind = self.stream.kind(tok);
        if kind.is_comment() {
            return;
        }

        // Preprocessor lines always begin a line, at the leftmost column.
        let (lbegin, indlvl) = if kind == TokenKind::Preproc {
            (true, 0)
        } else {
            (self.stream.lbegin(tok), self.stream.indlvl(tok))
        };

        let bad_mix = extra > 0;
        let bad_tabs = tabs != indlvl as usize;
        let bad_spaces = if lbegin { spaces != 0 } else { spaces != CONT_SPACES };

        if !bad_mix && !bad_tabs && !bad_spaces {
            return;
        }

        if self.fix {
            for id in prefix {
                self.stream.remove(id);
            }
            if indlvl > 0 {
                let text = "\t".repeat(indlvl as usize);
                self.stream
                    .insert_before(tok, Token::synthetic(TokenKind::Tab, text));
            }
            if !lbegin {
                let text = " ".repeat(CONT_SPACES);
                self.stream
                    .insert_before(tok, Token::synthetic(TokenKind::Space, text));
            }
            return;
        }

        if bad_mix {
            self.report_at_tok(tok, "Mixing tabs and spaces for indentation");
        }
        if bad_tabs {
            self.report_at_tok(
                tok,
                &format!(
                    "Wrong indentation: found {} tabs, should be {} tabs",
                    tabs, indlvl
                ),
            );
        }
        if bad_spaces {
            if lbegin {
                self.report_at_tok(
                    tok,
                    &format!(
                        "Non-continuation line should not have any spaces for indentation (found {})",
                        spaces
                    ),
                );
            } else {
                self.report_at_tok(
                    tok,
                    &format!(
                        "Continuation line should have exactly {} spaces for indentation (found {})",
                        CONT_SPACES, spaces
                    ),
                );
            }
        }
    }

    /// Flags whitespace between the last content of a line and its end.
    fn check_trailing_ws(&mut self, line: &[TokId]) {
        if !line
            .iter()
            .any(|&id| !self.stream.kind(id).is_whitespace())
        {
            return;
        }

        let trailing: Vec<TokId> = line
            .iter()
            .rev()
            .take_while(|&&id| self.stream.kind(id).is_whitespace())
            .copied()
            .collect();
        if trailing.is_empty() {
            return;
        }

        if self.fix {
            for id in trailing {
                self.stream.remove(id);
            }
            return;
        }

        // Report at the last trailing byte.
        let epos = trailing
            .iter()
            .map(|&id| self.stream.tok(id).epos)
            .max()
            .unwrap();
        self.handler
            .warning(SrcRange::point(epos), "Whitespace at end of line");
    }

    /// Reports lines running past the column limit. There is no repair;
    /// this is diagnosed in fix mode too.
    fn check_line_length(&mut self, line: &[TokId]) {
        let Some(&last) = line.last() else { return };
        let epos = self.stream.tok(last).epos;
        if epos.is_dummy() || epos.col <= LINE_LIMIT {
            return;
        }
        self.handler.warning(
            SrcRange::point(epos),
            format!("Line too long ({} columns)", epos.col),
        );
    }
}
