//! Integration tests for formcheck-validator.
//!
//! Each module drives the public API only: trees are built against a
//! `MemorySession` and inspected through evaluated or emitted outcome maps.

mod common;
mod lifecycle;
mod namespaces;
mod tree_evaluation;
