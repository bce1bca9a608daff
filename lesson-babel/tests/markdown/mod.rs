//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ Document conversion.

mod import;
mod properties;
mod roundtrip;
