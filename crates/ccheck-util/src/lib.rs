//! ccheck-util - Shared infrastructure for the ccheck pipeline.
//!
//! This crate provides the building blocks used by every other crate in the
//! workspace: source position tracking and the diagnostic handler that
//! collects style violations for later rendering.

pub mod diagnostic;
pub mod pos;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use pos::{Pos, SrcRange};
