//! Intermediate Representation (IR) for rich-text lesson documents.
//!
//! This module defines the typed document tree that sits between the two text
//! forms we deal with: the JSON payload stored remotely and Markdown edited locally.
//! `nodes` holds the tree itself, `wire` its JSON shape.

pub mod nodes;
pub mod wire;

pub use nodes::{Document, Mark, Node};
