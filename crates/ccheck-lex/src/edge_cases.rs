//! Edge case tests for ccheck-lex
