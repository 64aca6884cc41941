//! Edge case tests for ccheck-style
