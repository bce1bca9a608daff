//! Rich-text JSON payload tests

mod payload;
