//! Diagnostic reporting infrastructure.
//!
//! Style violations found by the checker are collected by a [`Handler`] and
//! rendered by the driver as `file:RANGE: message` lines. The handler keeps
//! diagnostics behind a `RefCell` so that code holding a shared reference to
//! it can still report.

use std::cell::RefCell;
use std::fmt;

use crate::pos::SrcRange;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A fatal problem; processing of the translation unit stops.
    Error,
    /// A style violation; reported in check mode, repaired in fix mode.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic message with its source range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Source range the message refers to.
    pub range: SrcRange,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(level: Level, range: SrcRange, message: impl Into<String>) -> Self {
        Self {
            level,
            range,
            message: message.into(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(range: SrcRange, message: impl Into<String>) -> Self {
        Self::new(Level::Error, range, message)
    }

    /// Creates a warning diagnostic.
    pub fn warning(range: SrcRange, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, range, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.range, self.message)
    }
}

/// Collector for diagnostics produced while processing one translation unit.
///
/// # Examples
///
/// ```
/// use ccheck_util::diagnostic::Handler;
/// use ccheck_util::pos::{Pos, SrcRange};
///
/// let handler = Handler::new();
/// handler.warning(SrcRange::point(Pos::new(1, 12)), "Whitespace at end of line");
/// assert_eq!(handler.warning_count(), 1);
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates a new, empty handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Reports an error.
    pub fn error(&self, range: SrcRange, message: impl Into<String>) {
        self.emit(Diagnostic::error(range, message));
    }

    /// Reports a style violation.
    pub fn warning(&self, range: SrcRange, message: impl Into<String>) {
        self.emit(Diagnostic::warning(range, message));
    }

    /// Emits a pre-built diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if any diagnostic was reported, at any level.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Returns true if any error-level diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Returns a copy of all collected diagnostics, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Returns all diagnostics sorted by source position.
    ///
    /// The sort is stable, so diagnostics sharing a position keep their
    /// emission order.
    pub fn sorted_diagnostics(&self) -> Vec<Diagnostic> {
        let mut diags = self.diagnostics();
        diags.sort_by_key(|d| d.range.begin);
        diags
    }

    /// Discards all collected diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
