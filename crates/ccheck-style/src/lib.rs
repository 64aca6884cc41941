//! ccheck-style - Layout checker and fixer.
//!
//! The checker runs two passes over a parsed translation unit:
//!
//! 1. An AST walk (depth-first, left-to-right) that classifies every
//!    grammatical token by its contextual whitespace requirement, assigns
//!    each token its expected indentation level, and marks the tokens that
//!    must begin a line.
//! 2. A linear scan over the token sequence that enforces per-line rules:
//!    the tab/space indentation prefix, trailing whitespace, and the
//!    80-column limit.
//!
//! In check mode every violated requirement produces a diagnostic through
//! the shared [`Handler`]. In fix mode the stream is repaired in place
//! instead: the only mutations are inserting and removing whitespace
//! tokens, so the grammatical token sequence is invariant and re-parsing
//! the output yields the same tree shape. Repairs are idempotent.

mod edge_cases;
mod indent;
mod space;
mod walk;

use ccheck_lex::TokenStream;
use ccheck_par::ast::Module;
use ccheck_util::Handler;

/// The checker's current indentation frame. Nested blocks add one tab.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope {
    pub indlvl: u32,
}

impl Scope {
    /// The top-level frame.
    pub fn top() -> Self {
        Scope { indlvl: 0 }
    }

    /// One tab deeper.
    pub fn nested(self) -> Self {
        Scope {
            indlvl: self.indlvl + 1,
        }
    }

    /// One tab shallower, for case and goto labels.
    pub fn dedented(self) -> Self {
        Scope {
            indlvl: self.indlvl.saturating_sub(1),
        }
    }
}

/// Checker state shared by the walk and the line pass.
pub struct StyleChecker<'a> {
    stream: &'a mut TokenStream,
    handler: &'a Handler,
    fix: bool,
}

impl<'a> StyleChecker<'a> {
    /// Creates a checker over the given stream.
    pub fn new(stream: &'a mut TokenStream, handler: &'a Handler, fix: bool) -> Self {
        Self {
            stream,
            handler,
            fix,
        }
    }

    /// Runs both passes.
    pub fn run(&mut self, module: &Module) {
        self.walk_module(module);
        self.check_lines();
    }
}

/// Checks (or, with `fix`, repairs) one parsed translation unit.
///
/// Style violations are reported through `handler` in check mode; in fix
/// mode the stream is mutated instead and only the violations that have no
/// repair (overlong lines) are reported.
pub fn check(stream: &mut TokenStream, module: &Module, handler: &Handler, fix: bool) {
    StyleChecker::new(stream, handler, fix).run(module);
}
